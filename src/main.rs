mod app;
mod app_router;
mod canvas;
mod input;
mod runtime;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = app::run() {
        gloo::console::error!("dotgrid: startup failed", err);
    }
}
