pub mod expr;
pub mod labelled;

/// Install a test logger; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
