use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DUMP: &str = "@00010000\n37 01 03 00\n13 05\n@00010100\nde ad be ef\n";

fn expected_bin() -> Vec<u8> {
    let mut bytes = vec![8, 0, 0, 0, 0x00, 0x00, 0x01, 0x00];
    bytes.extend_from_slice(&[0x37, 0x01, 0x03, 0x00, 0x13, 0x05, 0x00, 0x00]);
    bytes.extend_from_slice(&[4, 0, 0, 0, 0x00, 0x01, 0x01, 0x00]);
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    bytes.extend_from_slice(&[0, 0, 0, 0, 0x00, 0x00, 0x01, 0x00]);
    bytes
}

#[test]
#[allow(deprecated)]
fn packs_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("firmware.dump");
    fs::write(&input, DUMP)?;
    let out_dir = temp_dir.path().join("out");

    Command::cargo_bin("icebreaker-flash-image")?
        .arg("0x10000")
        .arg("--input")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    let bin = fs::read(out_dir.join("firmware.bin"))?;
    assert_eq!(bin, expected_bin());

    let hex = fs::read_to_string(out_dir.join("firmware.hex"))?;
    let mut lines = hex.lines();
    assert_eq!(lines.next(), Some("@100000"));
    let bytes: Vec<u8> = lines
        .next()
        .expect("byte line")
        .split(' ')
        .map(|t| u8::from_str_radix(t, 16).expect("hex byte"))
        .collect();
    assert_eq!(bytes, expected_bin());
    assert_eq!(lines.next(), None);

    Ok(())
}

#[test]
#[allow(deprecated)]
fn reads_stdin_when_no_input_given() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;

    Command::cargo_bin("icebreaker-flash-image")?
        .arg("10000")
        .arg("-o")
        .arg(temp_dir.path())
        .write_stdin(DUMP)
        .assert()
        .success();

    assert_eq!(fs::read(temp_dir.path().join("firmware.bin"))?, expected_bin());
    Ok(())
}

#[test]
#[allow(deprecated)]
fn rejects_block_outside_ram() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;

    Command::cargo_bin("icebreaker-flash-image")?
        .arg("10000")
        .arg("--out-dir")
        .arg(temp_dir.path())
        .write_stdin("@00040000\n00\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit in RAM"));

    assert!(!temp_dir.path().join("firmware.bin").exists());
    Ok(())
}

#[test]
#[allow(deprecated)]
fn rejects_bad_entry_address() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("icebreaker-flash-image")?
        .arg("main")
        .write_stdin(DUMP)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid entry address"));
    Ok(())
}
