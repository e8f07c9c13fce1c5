mod application;
mod presentation;

use nfcpack_core::error::Result;

fn main() -> Result<()> {
    // Normalization is the whole point of the tool; bail before any
    // file is accepted if the compiled tables misbehave.
    nfcpack_core::self_check()?;
    application::run()
}
