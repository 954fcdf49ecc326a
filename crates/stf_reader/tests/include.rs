use std::collections::HashMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stf_reader::error::Result;
use stf_reader::{Item, StfReader};
use tracing_test::traced_test;

fn files(entries: &[(&str, &str)]) -> HashMap<PathBuf, String> {
    entries
        .iter()
        .map(|(path, text)| (PathBuf::from(path), text.to_string()))
        .collect()
}

fn read_all(reader: &mut StfReader) -> Result<Vec<String>> {
    let mut items = Vec::new();
    while !reader.eof() {
        items.push(reader.read_item()?.into_string());
    }
    Ok(items)
}

#[traced_test]
#[test]
fn items_are_spliced() -> Result<()> {
    let loader = files(&[
        ("trains/main.con", "SIMISA@@@@@@@@@@JINX0D0t______\nTrain ( include ( common.inc ) Last )"),
        ("trains/common.inc", "SIMISA@@@@@@@@@@JINX0D0t______\n\nFirst ( 1 )"),
    ]);
    let mut reader = StfReader::open_with("trains/main.con", loader)?;

    assert_eq!(read_all(&mut reader)?, vec!["Train", "(", "First", "(", "1", ")", "Last", ")"]);
    assert!(reader.finish().is_empty());
    Ok(())
}

#[traced_test]
#[test]
fn line_numbers_follow_the_include() -> Result<()> {
    let loader = files(&[
        ("a.stf", "sig\none include ( sub\\\\b.stf )\nthree"),
        ("sub/b.stf", "sig\n\ntwo"),
    ]);
    let mut reader = StfReader::open_with("a.stf", loader)?;

    assert_eq!(reader.read_item()?, "one");
    assert_eq!(reader.line_number(), 2);
    assert_eq!(reader.read_item()?, "two");
    assert_eq!(reader.file_name(), PathBuf::from("sub/b.stf"));
    assert_eq!(reader.line_number(), 3);
    assert_eq!(reader.read_item()?, "three");
    assert_eq!(reader.file_name(), PathBuf::from("a.stf"));
    Ok(())
}

#[traced_test]
#[test]
fn single_backslash_in_bare_include_is_an_escape() -> Result<()> {
    let loader = files(&[("a.stf", "sig\ninclude ( sub\\b.stf )"), ("subb.stf", "sig\nescaped")]);
    let mut reader = StfReader::open_with("a.stf", loader)?;

    assert_eq!(reader.read_item()?, "escaped");
    assert_eq!(reader.file_name(), PathBuf::from("subb.stf"));
    Ok(())
}

#[traced_test]
#[test]
fn nested_includes_resolve_relative_paths() -> Result<()> {
    let loader = files(&[
        ("root/a.stf", "sig\ninclude ( one/b.stf ) end"),
        ("root/one/b.stf", "sig\ninclude ( two/c.stf ) b"),
        ("root/one/two/c.stf", "sig\nc"),
    ]);
    let mut reader = StfReader::open_with("root/a.stf", loader)?;

    assert_eq!(read_all(&mut reader)?, vec!["c", "b", "end"]);
    Ok(())
}

#[traced_test]
#[test]
fn samename_include() -> Result<()> {
    let loader = files(&[
        ("base/eng.eng", "sig\ninclude ( ../common/[[samename]] )"),
        ("base/../common/eng.eng", "sig\nShared"),
    ]);
    let mut reader = StfReader::open_with("base/eng.eng", loader)?;

    assert_eq!(reader.read_item()?, "Shared");
    Ok(())
}

#[traced_test]
#[test]
fn unbalanced_include_warns() -> Result<()> {
    let loader = files(&[
        ("a.stf", "sig\nOuter ( include ( b.inc ) )"),
        ("b.inc", "sig\nInner ( 1"),
    ]);
    let mut reader = StfReader::open_with("a.stf", loader)?;
    read_all(&mut reader)?;

    assert!(logs_contain(
        "Expected depth 0; got depth 1 at end of file (missing ')'?) in b.inc"
    ));
    Ok(())
}

#[traced_test]
#[test]
fn missing_include_is_an_error() {
    let loader = files(&[("a.stf", "sig\ninclude ( gone.inc )")]);
    let mut reader = StfReader::open_with("a.stf", loader).expect("root file is present");

    let result = reader.read_item();
    assert!(matches!(result, Err(stf_reader::Error::Open { .. })));
}

#[traced_test]
#[test]
fn empty_include_is_transparent() -> Result<()> {
    let loader = files(&[("a.stf", "sig\n( include ( e.inc ) )"), ("e.inc", "sig\n")]);
    let mut reader = StfReader::open_with("a.stf", loader)?;

    assert_eq!(reader.read_item()?, Item::Open);
    assert_eq!(reader.read_item()?, Item::Close);
    assert_eq!(reader.depth(), 0);
    assert!(reader.eof());
    Ok(())
}
