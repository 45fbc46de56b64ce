fn main() -> anyhow::Result<()> {
    hashbench::run()
}
