use anyhow::{Context, Result};
use gf28_ssss::{Config, DefaultSource, SplitMode, Splitter, get_x, get_y, gf28};

fn main() -> Result<()> {
    println!("=== GF(2^8) Secret Split Demo ===\n");

    println!("Field: generator {:#04x}, reducing polynomial {:#05x}", gf28::GEN, gf28::PRIM_POLY);
    println!(
        "0x53 * 0xCA = {:#04x}, inverse of 0x02 = {:#04x}\n",
        gf28::mul(0x53, 0xCA)?,
        gf28::inv(0x02)?
    );

    let secret = "This is a secret message split over GF(2^8)";
    let splitter = Splitter::builder(3)
        .total_shares(5)
        .with_config(Config::new().with_mode(SplitMode::Parallel))
        .build()
        .context("building splitter")?;

    let mut rng = DefaultSource::from_os_rng().context("seeding ChaCha20 from the OS")?;
    let shares = splitter.split(secret, &mut rng)?;

    println!("Secret: {:?} ({} bytes)", secret, secret.len());
    println!(
        "Configuration: {} total shares, threshold of {}\n",
        splitter.total_shares(),
        splitter.threshold()
    );

    for share in &shares {
        let bytes = share.as_bytes();
        let preview: Vec<String> = (0..4)
            .map(|idx| get_y(bytes, idx).map(|y| format!("{:02x}", y)))
            .collect::<Result<_, _>>()?;
        println!(
            "share x={:3}  len={:3}  y[0..4]={}",
            get_x(bytes)?,
            bytes.len(),
            preview.join(" ")
        );
    }

    Ok(())
}
