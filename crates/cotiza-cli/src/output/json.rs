use cotiza_core::error::CotizaError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), CotizaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
