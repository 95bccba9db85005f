fn main() {
    if let Err(err) = stickler::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
