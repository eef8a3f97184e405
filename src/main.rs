fn main() -> anyhow::Result<()> {
    env_logger::init();
    seqstat::cli::run::entry()
}
