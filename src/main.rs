use reqvolley::entry;
use reqvolley::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
