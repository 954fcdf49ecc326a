use clap::Args;
use miette::Result;
use stf_units::{parse_unit_suffix, Units};
use tracing::warn;

#[derive(Args)]
pub struct ConvertArgs {
    /// Accepted unit families, e.g. `Mass` or `PressureDefaultPSI,Compulsory`
    #[arg(short, long, value_name = "FAMILY")]
    units: Units,

    /// Values such as `60mph` or `2.5bar`
    #[arg(value_name = "VALUE", required = true)]
    values: Vec<String>,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        for value in &self.values {
            let parsed = parse_unit_suffix(value, self.units);
            if let Some(issue) = &parsed.issue {
                warn!("{}", issue.describe(self.units));
            }

            match parsed.number.replace(',', "").parse::<f64>() {
                Ok(number) => println!("{value} = {}", parsed.conversion.apply(number)),
                Err(_) => warn!("Cannot parse the constant number {value}"),
            }
        }
        Ok(())
    }
}
