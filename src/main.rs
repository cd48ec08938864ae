fn main() -> std::process::ExitCode {
    ape_keyring::run()
}
