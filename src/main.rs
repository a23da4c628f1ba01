use plowtrack::error::AppResult;

fn main() -> AppResult<()> {
    plowtrack::run()
}
