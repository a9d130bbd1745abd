#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
fn main() {
    web::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    classquiz::logging::init(log::LevelFilter::Info);
    log::error!("the quiz front end runs in the browser; build it for wasm32 with trunk");
}
