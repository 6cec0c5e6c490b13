fn main() {
    if let Err(err) = page2osd::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
