//! List and decode commands

use chipinfo_core::flash::{find_vendor, FlashId};
use chipinfo_detect::{available_backends, available_controllers, ControllerRegistry};

/// List compiled-in controller decoders and device backends
pub fn list_controllers() {
    println!("Supported controllers:");
    println!();
    for info in available_controllers() {
        println!("  {:<8} - {}", info.name, info.description);
        for param in info.parameters {
            println!("      {}=<value>  {}", param.key, param.description);
        }
    }

    println!();
    println!("Device backends:");
    println!();
    for backend in available_backends() {
        println!("  {:<8} - {}", backend.name, backend.description);
        if !backend.aliases.is_empty() {
            println!("      aliases: {}", backend.aliases.join(", "));
        }
    }
}

/// List known Alcor chips, optionally filtered
pub fn list_chips(registry: &ControllerRegistry, generation: Option<u8>, chip: Option<u16>) {
    let Some(db) = registry.chip_database() else {
        println!("Alcor decoder not compiled in");
        return;
    };

    println!("Known {} chips:", db.chips().first().map_or("Alcor", |c| c.vendor.as_str()));
    println!();
    println!("{:<6} {:<4} {:>3}  {}", "Chip", "Rev", "Gen", "Names");
    println!("{}", "-".repeat(60));

    let mut shown = 0;
    for model in db.iter() {
        if generation.is_some_and(|g| g != model.generation) {
            continue;
        }
        if chip.is_some_and(|c| c != model.chip) {
            continue;
        }

        let rev = model
            .rev
            .map(|r| format!("{:02X}", r))
            .unwrap_or_else(|| "--".to_string());
        println!(
            "{:04X}   {:<4} {:>3}  {}",
            model.chip,
            rev,
            model.generation,
            model.joined_names("")
        );
        shown += 1;
    }

    println!();
    println!("{} of {} entries", shown, db.len());
}

/// Parse hex bytes given as separate arguments or one run of digits
fn parse_hex_bytes(args: &[String]) -> Result<Vec<u8>, String> {
    let digits: String = args
        .iter()
        .flat_map(|a| a.split([' ', ':', ',']))
        .map(|a| a.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex digits in '{}'", digits));
    }
    if digits.is_empty() || digits.len() % 2 != 0 {
        return Err(format!("Expected an even number of hex digits, got '{}'", digits));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("Invalid hex byte: {}", &digits[i..i + 2]))
        })
        .collect()
}

/// Decode a flash ID given on the command line
pub fn decode_fid(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let raw = parse_hex_bytes(args)?;
    let fid = FlashId::decode(&raw);

    println!("Flash ID:     {}", fid.hex());
    println!("Manufacturer: {}", fid.maker);
    println!("Significant:  {} byte(s)", fid.len());
    if find_vendor(raw[0]).is_none() {
        log::warn!("Manufacturer byte {:02X} not in table", raw[0]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(
            parse_hex_bytes(&args(&["98", "D7", "84"])).unwrap(),
            vec![0x98, 0xD7, 0x84]
        );
        assert_eq!(
            parse_hex_bytes(&args(&["98d78493"])).unwrap(),
            vec![0x98, 0xD7, 0x84, 0x93]
        );
        assert_eq!(
            parse_hex_bytes(&args(&["0xEC:D7"])).unwrap(),
            vec![0xEC, 0xD7]
        );
    }

    #[test]
    fn test_parse_hex_bytes_errors() {
        assert!(parse_hex_bytes(&args(&["987"])).is_err());
        assert!(parse_hex_bytes(&args(&["zz"])).is_err());
        assert!(parse_hex_bytes(&args(&[])).is_err());
    }

    #[test]
    fn test_decode_fid() {
        assert!(decode_fid(&args(&["11", "22"])).is_ok());
        assert!(decode_fid(&args(&["x"])).is_err());
    }
}
