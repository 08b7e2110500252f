use anyhow::Result;

fn main() -> Result<()> {
    dropcat_cli::main_entry()
}
