//! Print a fresh salt

use crate::crypto;
use crate::error::Result;

pub fn run() -> Result<()> {
    println!("{}", crypto::generate_random_salt());
    Ok(())
}
