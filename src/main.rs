use healthratio::error::AppResult;

fn main() -> AppResult<()> {
    healthratio::entry::run()
}
