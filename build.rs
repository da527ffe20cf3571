use std::env;

fn main() {
    // Debug builds default to development mode; CV_AGENT_MODE overrides at runtime.
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());
    if profile == "debug" {
        println!("cargo:rustc-env=APP_NAME=CV Agent (Dev)");
        println!("cargo:rustc-env=CV_AGENT_BUILD_MODE=development");
    } else {
        println!("cargo:rustc-env=APP_NAME=CV Agent");
        println!("cargo:rustc-env=CV_AGENT_BUILD_MODE=production");
    }
}
