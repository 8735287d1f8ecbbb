#[macroquad::main("Drone Delivery")]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    dronedelivery_web_lib::init_tracing();

    dronedelivery_web_lib::run().await;
}
