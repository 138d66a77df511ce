fn main() {
    // Host builds (tests, simulation) skip the ESP-IDF build environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
