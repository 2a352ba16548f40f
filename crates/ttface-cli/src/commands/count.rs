//! Count command implementation

use anyhow::Result;

use super::{module_for, read_font};
use crate::cli::CountArgs;

pub fn run(args: &CountArgs) -> Result<()> {
    let data = read_font(&args.font)?;
    let module = module_for(data.len())?;
    match ttface::fonts_in_collection(&module, &data)? {
        Some(count) => println!("{count}"),
        None => println!("not a collection"),
    }
    Ok(())
}
