//! Collects version and build environment information at compile time so
//! that the binary can report exactly which build produced a training run.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
