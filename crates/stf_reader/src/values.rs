//! Typed value readers
//!
//! Scalars read one item. Block readers expect `( value ... )`, read the
//! value and skip anything else up to the closing `)`. Malformed data is a
//! warning and the default is used instead.
//!
use std::{fmt::Display, str::FromStr};

use stf_units::{parse_unit_suffix, Units};

use crate::{
    error::Result,
    item::Item,
    lexer::Mode,
    read::StfReader,
    types::{Color, Vector2, Vector3, Vector4},
};

impl StfReader {
    fn read_value<T>(
        &mut self,
        default: Option<T>,
        expecting: &str,
        parse: impl FnOnce(&mut Self, &str) -> Option<T>,
    ) -> Result<T>
    where
        T: Copy + Default + Display,
    {
        let item = self.read_item()?;
        if let (Some(default), Item::Close) = (default, &item) {
            self.warn(format!(
                "When expecting a {expecting}, we found a ) marker. Using the default {default}"
            ));
            self.step_back_one_item();
            return Ok(default);
        }
        if item.is_empty() {
            return Ok(T::default());
        }

        if let Some(value) = parse(self, item.as_str()) {
            return Ok(value);
        }
        self.warn(format!("Cannot parse the constant {expecting} {item}"));
        if item.is_close() {
            self.step_back_one_item();
        }
        Ok(default.unwrap_or_default())
    }

    fn read_scaled(&mut self, units: Units, default: Option<f64>) -> Result<f64> {
        self.read_value(default, "number", |reader, text| {
            let parsed = parse_unit_suffix(text, units);
            if let Some(issue) = &parsed.issue {
                reader.warn(issue.describe(units));
            }
            let value: f64 = parse_number(parsed.number)?;
            Some(parsed.conversion.apply(value))
        })
    }

    pub fn read_int(&mut self, default: Option<i32>) -> Result<i32> {
        self.read_value(default, "number", |_, text| parse_number(text))
    }

    pub fn read_uint(&mut self, default: Option<u32>) -> Result<u32> {
        self.read_value(default, "number", |_, text| parse_number(text))
    }

    /// Hex digits without any prefix, e.g. `ff00ABCD`
    pub fn read_hex(&mut self, default: Option<u32>) -> Result<u32> {
        self.read_value(default, "hex string", |_, text| {
            u32::from_str_radix(text, 16).ok()
        })
    }

    /// A number with an optional unit suffix, converted to the canonical
    /// unit of `units`
    pub fn read_float(&mut self, units: Units, default: Option<f32>) -> Result<f32> {
        Ok(self.read_scaled(units, default.map(f64::from))? as f32)
    }

    pub fn read_double(&mut self, units: Units, default: Option<f64>) -> Result<f64> {
        self.read_scaled(units, default)
    }

    /// Three floats, not wrapped in a block
    pub fn read_vector3(&mut self, units: Units, default: Vector3) -> Result<Vector3> {
        Ok(Vector3 {
            x: self.read_float(units, Some(default.x))?,
            y: self.read_float(units, Some(default.y))?,
            z: self.read_float(units, Some(default.z))?,
        })
    }

    fn read_block<T: Default>(
        &mut self,
        default: Option<T>,
        read: impl FnOnce(&mut Self, Option<T>) -> Result<T>,
    ) -> Result<T> {
        if self.eof() {
            self.warn("Unexpected end of file");
            return Ok(default.unwrap_or_default());
        }

        match (self.read_item()?, default) {
            (Item::Close, Some(default)) => {
                self.step_back_one_item();
                Ok(default)
            }
            (Item::Open, default) => {
                let value = read(self, default)?;
                self.skip_rest_of_block()?;
                Ok(value)
            }
            (other, default) => {
                self.warn(format!("Block Not Found - instead found {other}"));
                Ok(default.unwrap_or_default())
            }
        }
    }

    pub fn read_int_block(&mut self, default: Option<i32>) -> Result<i32> {
        self.read_block(default, Self::read_int)
    }

    pub fn read_uint_block(&mut self, default: Option<u32>) -> Result<u32> {
        self.read_block(default, Self::read_uint)
    }

    pub fn read_hex_block(&mut self, default: Option<u32>) -> Result<u32> {
        self.read_block(default, Self::read_hex)
    }

    pub fn read_float_block(&mut self, units: Units, default: Option<f32>) -> Result<f32> {
        self.read_block(default, |reader, default| reader.read_float(units, default))
    }

    pub fn read_double_block(&mut self, units: Units, default: Option<f64>) -> Result<f64> {
        self.read_block(default, |reader, default| {
            reader.read_double(units, default)
        })
    }

    pub fn read_vector2_block(&mut self, units: Units, default: Vector2) -> Result<Vector2> {
        self.read_block(Some(default), |reader, _| {
            Ok(Vector2 {
                x: reader.read_float(units, Some(default.x))?,
                y: reader.read_float(units, Some(default.y))?,
            })
        })
    }

    pub fn read_vector3_block(&mut self, units: Units, default: Vector3) -> Result<Vector3> {
        self.read_block(Some(default), |reader, _| reader.read_vector3(units, default))
    }

    pub fn read_vector4_block(&mut self, units: Units, default: Vector4) -> Result<Vector4> {
        self.read_block(Some(default), |reader, _| {
            Ok(Vector4 {
                x: reader.read_float(units, Some(default.x))?,
                y: reader.read_float(units, Some(default.y))?,
                z: reader.read_float(units, Some(default.z))?,
                w: reader.read_float(units, Some(default.w))?,
            })
        })
    }

    /// A hex `AARRGGBB` colour in a block
    pub fn read_color_block(&mut self, default: Option<Color>) -> Result<Color> {
        let default = default.unwrap_or(Color::BLACK);
        let argb = self.read_hex_block(Some(default.to_argb()))?;
        Ok(Color::from_argb(argb))
    }

    /// The first item of a block, taken literally.
    ///
    /// Returns `None` only when no default is given and no block was found.
    pub fn read_string_block(&mut self, default: Option<&str>) -> Result<Option<String>> {
        let default = default.map(str::to_string);
        if self.eof() {
            self.warn("Unexpected end of file");
            return Ok(default);
        }

        match self.read_item()? {
            Item::Close if default.is_some() => {
                self.step_back_one_item();
                Ok(default)
            }
            Item::Open => match self.next_item(Mode::String)? {
                Item::Close => {
                    self.warn("Expected string block; got empty block");
                    Ok(Some(default.unwrap_or_default()))
                }
                value => {
                    self.skip_rest_of_block()?;
                    Ok(Some(value.into_string()))
                }
            },
            other => {
                self.warn(format!("Block Not Found - instead found {other}"));
                Ok(default)
            }
        }
    }

    /// `( true )`, `( false )` or an integer where non-zero is true
    pub fn read_bool_block(&mut self, default: bool) -> Result<bool> {
        if self.eof() {
            self.warn("Unexpected end of file");
            return Ok(default);
        }

        match self.read_item()? {
            Item::Close => {
                self.step_back_one_item();
                Ok(default)
            }
            Item::Open => {
                let value = match self.read_item()? {
                    Item::Close => return Ok(default),
                    item if item.is("true") => true,
                    item if item.is("false") => false,
                    item => match parse_number::<i32>(item.as_str()) {
                        Some(value) => value != 0,
                        None => {
                            self.warn(format!("Cannot parse the constant number {item}"));
                            default
                        }
                    },
                };
                self.skip_rest_of_block()?;
                Ok(value)
            }
            other => {
                self.warn(format!("Block Not Found - instead found {other}"));
                Ok(default)
            }
        }
    }
}

/// Thousands separators are allowed anywhere in a number
fn parse_number<T: FromStr>(text: &str) -> Option<T> {
    text.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn reader(text: &str) -> StfReader {
        StfReader::from_text(text, "values.stf")
    }

    #[test]
    fn integers() -> Result<()> {
        let mut stf = reader("12 +2 -7, 00ABCDEF 4294967295 1,000");
        assert_eq!(stf.read_int(None)?, 12);
        assert_eq!(stf.read_int(None)?, 2);
        assert_eq!(stf.read_int(None)?, -7);
        assert_eq!(stf.read_hex(None)?, 0x00ABCDEF);
        assert_eq!(stf.read_uint(None)?, u32::MAX);
        assert_eq!(stf.read_int(None)?, 1000);
        Ok(())
    }

    #[test]
    fn floats_with_units() -> Result<()> {
        let mut stf = reader("60mph 100kg 50 1e9 1.5,");
        let speed = stf.read_float(Units::SPEED, Some(0.0))?;
        assert!((speed - 26.8224).abs() < 1e-4);
        assert_eq!(stf.read_float(Units::MASS, Some(0.0))?, 100.0);
        assert_eq!(stf.read_float(Units::DISTANCE, Some(0.0))?, 50.0);
        assert_eq!(stf.read_double(Units::NONE, None)?, 1e9);
        assert_eq!(stf.read_double(Units::ANY, None)?, 1.5);
        Ok(())
    }

    #[traced_test]
    #[test]
    fn default_on_close() -> Result<()> {
        let mut stf = reader(")");
        assert_eq!(stf.read_int(Some(5))?, 5);
        assert!(logs_contain("When expecting a number, we found a ) marker"));
        assert_eq!(stf.read_item()?, Item::Close);
        Ok(())
    }

    #[traced_test]
    #[test]
    fn unparseable_numbers() -> Result<()> {
        let mut stf = reader("noint 10xyz zz )");
        assert_eq!(stf.read_int(Some(3))?, 3);
        assert_eq!(stf.read_float(Units::MASS, Some(0.0))?, 0.0);
        assert!(logs_contain("Found a suffix 'xyz' which could not be parsed as a Mass unit"));
        assert_eq!(stf.read_hex(None)?, 0);
        assert!(logs_contain("Cannot parse the constant hex string zz"));
        assert_eq!(stf.read_int(None)?, 0);
        assert_eq!(stf.read_item()?, Item::Close);
        Ok(())
    }

    #[test]
    fn empty_values_are_zero() -> Result<()> {
        let mut stf = reader("\"\"");
        assert_eq!(stf.read_int(Some(9))?, 0);
        assert_eq!(stf.read_float(Units::ANY, Some(9.0))?, 0.0);
        Ok(())
    }

    #[test]
    fn int_block_with_default() -> Result<()> {
        let mut stf = reader(")");
        assert_eq!(stf.read_int_block(Some(5))?, 5);
        assert!(stf.end_of_block());
        assert!(stf.eof());

        let mut stf = reader("()a");
        assert_eq!(stf.read_int_block(Some(5))?, 5);
        assert_eq!(stf.read_item()?, Item::from("a"));
        Ok(())
    }

    #[test]
    fn blocks_skip_extra_items() -> Result<()> {
        let mut stf = reader("(7 dummy_token(nested_token)) ( 2.5km extra ) next");
        assert_eq!(stf.read_int_block(None)?, 7);
        assert_eq!(stf.read_float_block(Units::DISTANCE, None)?, 2500.0);
        assert_eq!(stf.read_item()?, Item::from("next"));
        assert_eq!(stf.depth(), 0);
        Ok(())
    }

    #[traced_test]
    #[test]
    fn block_not_found() -> Result<()> {
        let mut stf = reader("7 )");
        assert_eq!(stf.read_int_block(Some(4))?, 4);
        assert!(logs_contain("Block Not Found - instead found 7"));
        assert_eq!(stf.read_uint_block(None)?, 0);
        assert_eq!(stf.read_int_block(None)?, 0);
        assert!(logs_contain("Unexpected end of file"));
        Ok(())
    }

    #[test]
    fn vectors() -> Result<()> {
        let mut stf = reader("( 1 2 3 ) ( 1m 1ft ) ( 1 2 ) (0.5 0.25 0 1) 4 5 6");
        assert_eq!(
            stf.read_vector3_block(Units::NONE, Vector3::default())?,
            Vector3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            stf.read_vector2_block(Units::DISTANCE, Vector2::default())?,
            Vector2::new(1.0, 0.3048)
        );
        assert_eq!(
            stf.read_vector3_block(Units::NONE, Vector3::new(0.0, 0.0, 9.0))?,
            Vector3::new(1.0, 2.0, 9.0)
        );
        assert_eq!(
            stf.read_vector4_block(Units::NONE, Vector4::default())?,
            Vector4::new(0.5, 0.25, 0.0, 1.0)
        );
        assert_eq!(
            stf.read_vector3(Units::NONE, Vector3::default())?,
            Vector3::new(4.0, 5.0, 6.0)
        );
        Ok(())
    }

    #[test]
    fn colors() -> Result<()> {
        let mut stf = reader("( ff102030 ) )");
        assert_eq!(stf.read_color_block(None)?, Color::new(0x10, 0x20, 0x30, 0xff));
        assert_eq!(stf.read_color_block(None)?, Color::BLACK);
        Ok(())
    }

    #[traced_test]
    #[test]
    fn string_blocks() -> Result<()> {
        let mut stf = reader("( \"Data \" + \"Item\" ) ( _literal ) () ) x");
        assert_eq!(stf.read_string_block(None)?, Some("Data Item".to_string()));
        assert_eq!(stf.read_string_block(None)?, Some("_literal".to_string()));
        assert_eq!(stf.read_string_block(Some("dflt"))?, Some("dflt".to_string()));
        assert!(logs_contain("Expected string block; got empty block"));
        assert_eq!(stf.read_string_block(Some("dflt"))?, Some("dflt".to_string()));
        assert!(stf.end_of_block());
        assert_eq!(stf.read_string_block(None)?, None);
        assert!(stf.eof());
        assert_eq!(stf.read_string_block(None)?, None);
        Ok(())
    }

    #[test]
    fn bool_blocks() -> Result<()> {
        let mut stf = reader("(true) (FALSE) (1) (0 extra) () )");
        assert!(stf.read_bool_block(false)?);
        assert!(!stf.read_bool_block(true)?);
        assert!(stf.read_bool_block(false)?);
        assert!(!stf.read_bool_block(true)?);
        assert!(stf.read_bool_block(true)?);
        assert!(stf.read_bool_block(true)?);
        assert!(stf.end_of_block());
        Ok(())
    }
}
