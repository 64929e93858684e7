fn main() {
    // The plant table is compiled into the firmware image.
    println!("cargo:rerun-if-changed=config/plants.json");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
