#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), eframe::Error> {
    // RUST_LOG=system_design_editor=debug shows every diagram edit
    env_logger::init();

    system_design_editor::run_app()
}

// The browser build starts from `web::start` in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
