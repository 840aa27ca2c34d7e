fn main() {
    if let Err(e) = kidsmotion_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
