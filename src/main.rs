fn main() -> std::io::Result<()> {
    sandhub_lib::run()
}
