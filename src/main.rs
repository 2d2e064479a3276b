fn main() -> miette::Result<()> {
    njsx::cli::run()
}
