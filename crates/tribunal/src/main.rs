fn main() -> anyhow::Result<()> {
    tribunal::start(std::env::args())
}
