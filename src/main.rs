fn main() -> std::process::ExitCode {
    zwp_wait_lib::run()
}
