fn main() -> anyhow::Result<()> {
    pchr_parser::cli::run()
}
