fn main() {
    if let Err(err) = chatdock::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
