use std::fs::File;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stf_reader::error::Result;
use stf_reader::{Color, StfReader, TokenProcessor, Units, Vector3};
use tracing_test::traced_test;

fn resource(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/resources/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
}

#[derive(Default, Debug)]
struct Wagon {
    kind: String,
    name: String,
    size: Vector3,
    mass: f32,
    wheel_radius: f32,
    lights: Vec<Color>,
    brake_system: String,
    max_brake_force: f32,
}

fn wagon_processors<'a>() -> Vec<TokenProcessor<'a, Wagon>> {
    vec![
        TokenProcessor::new("type", |stf, wagon: &mut Wagon| {
            wagon.kind = stf.read_string_block(None)?.unwrap_or_default();
            Ok(())
        }),
        TokenProcessor::new("name", |stf, wagon: &mut Wagon| {
            wagon.name = stf.read_string_block(None)?.unwrap_or_default();
            Ok(())
        }),
        TokenProcessor::new("size", |stf, wagon: &mut Wagon| {
            wagon.size = stf.read_vector3_block(Units::DISTANCE, Vector3::default())?;
            Ok(())
        }),
        TokenProcessor::new("mass", |stf, wagon: &mut Wagon| {
            wagon.mass = stf.read_float_block(Units::MASS, None)?;
            Ok(())
        }),
        TokenProcessor::new("wheelradius", |stf, wagon: &mut Wagon| {
            wagon.wheel_radius = stf.read_float_block(Units::DISTANCE, None)?;
            Ok(())
        }),
        TokenProcessor::new("lights", |stf, wagon: &mut Wagon| {
            wagon.lights = stf.parse_block_list("light", |stf| {
                let mut colour = Color::BLACK;
                stf.parse_whole_block(
                    &mut colour,
                    &mut [TokenProcessor::new("colour", |stf, colour: &mut Color| {
                        *colour = stf.read_color_block(None)?;
                        Ok(())
                    })],
                )?;
                Ok(colour)
            })?;
            Ok(())
        }),
        TokenProcessor::new("brakesystemtype", |stf, wagon: &mut Wagon| {
            wagon.brake_system = stf.read_string_block(None)?.unwrap_or_default();
            Ok(())
        }),
        TokenProcessor::new("maxbrakeforce", |stf, wagon: &mut Wagon| {
            wagon.max_brake_force = stf.read_float_block(Units::FORCE, None)?;
            Ok(())
        }),
    ]
}

#[traced_test]
#[test]
fn parse_wagon() -> Result<()> {
    let mut reader = StfReader::open(resource("coach.wag"))?;
    assert_eq!(reader.simis_signature(), Some("SIMISA@@@@@@@@@@JINX0D0t______"));

    let mut wagon = Wagon::default();
    reader.parse_file(
        &mut wagon,
        &mut [TokenProcessor::new("wagon", |stf, wagon: &mut Wagon| {
            stf.parse_whole_block(wagon, &mut wagon_processors())
        })],
    )?;

    assert_eq!(wagon.kind, "Carriage");
    assert_eq!(wagon.name, "Coach Second");
    assert_eq!(wagon.size, Vector3::new(2.9, 4.1, 20.5));
    assert_eq!(wagon.mass, 40_000.0);
    assert!((wagon.wheel_radius - 0.4572).abs() < 1e-6);
    assert_eq!(
        wagon.lights,
        vec![
            Color::new(0x80, 0x80, 0x80, 0xff),
            Color::new(0x00, 0xff, 0x00, 0xff)
        ]
    );
    assert_eq!(wagon.brake_system, "Air single-pipe");
    assert!((wagon.max_brake_force - 19_600.0).abs() < 1e-2);

    let warnings = reader.finish();
    assert_eq!(warnings, vec![]);
    Ok(())
}

#[traced_test]
#[test]
fn parse_utf16_engine() -> Result<()> {
    let mut reader = StfReader::open(resource("engine_utf16.eng"))?;

    #[derive(Default)]
    struct Engine {
        kind: String,
        max_velocity: f32,
        name: Option<String>,
    }

    let mut engine = Engine::default();
    reader.parse_file(
        &mut engine,
        &mut [TokenProcessor::new("engine", |stf, engine: &mut Engine| {
            stf.verify_start_of_block()?;
            engine.kind = stf.read_string()?;
            stf.parse_block(
                engine,
                &mut [
                    TokenProcessor::new("maxvelocity", |stf, engine: &mut Engine| {
                        engine.max_velocity = stf.read_float_block(Units::SPEED, None)?;
                        Ok(())
                    }),
                    TokenProcessor::new("name", |stf, engine: &mut Engine| {
                        engine.name = stf.read_string_block(None)?;
                        Ok(())
                    }),
                ],
            )
        })],
    )?;

    assert_eq!(engine.kind, "Steam");
    assert!((engine.max_velocity - 26.8224).abs() < 1e-4);
    assert_eq!(engine.name.as_deref(), Some("Flying Scotsman"));
    assert!(reader.finish().is_empty());
    Ok(())
}

#[traced_test]
#[test]
fn read_from_stream() -> Result<()> {
    let mut file = File::open(resource("engine_utf16.eng"))?;
    // No signature handling here, so the signature is the first token
    let mut reader = StfReader::from_reader(&mut file, "engine_utf16.eng", None)?;

    assert_eq!(reader.read_string()?, "SIMISA@@@@@@@@@@JINX0D0t______");
    assert_eq!(reader.read_item()?, "Engine");
    assert_eq!(reader.line_number(), 3);
    reader.skip_block()?;
    assert!(reader.eof());
    Ok(())
}

#[traced_test]
#[test]
fn missing_file() {
    let result = StfReader::open(resource("missing.wag"));
    assert!(matches!(result, Err(stf_reader::Error::Open { .. })));
}

#[traced_test]
#[test]
fn unbalanced_file_warns_on_drop() -> Result<()> {
    {
        let mut reader = StfReader::from_text("Wagon ( Mass ( 1 )", "broken.wag");
        assert_eq!(reader.read_item()?, "Wagon");
        reader.verify_start_of_block()?;
        assert_eq!(reader.read_item()?, "Mass");
        reader.skip_block()?;
        assert_eq!(reader.depth(), 1);
    }
    assert!(logs_contain(
        "Expected depth 0; got depth 1 at end of file (missing ')'?)"
    ));
    Ok(())
}
