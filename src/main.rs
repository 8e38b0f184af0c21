use wave_folio::Config;

fn main() -> anyhow::Result<()> {
    wave_folio::run(Config::default())
}
