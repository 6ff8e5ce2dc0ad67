use vergen::{
    vergen,
    Config,
};

fn main() -> anyhow::Result<()> {
    if let Err(e) = vergen(Config::default()) {
        println!("cargo:warning=vergen failed: {e}");
    }

    Ok(())
}
