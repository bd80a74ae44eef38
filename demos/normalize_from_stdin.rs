use std::io;
use uri_normalize::Normalizer;

fn main() -> io::Result<()> {
    let normalizer = Normalizer::default();
    for line in io::stdin().lines() {
        match normalizer.normalize_str(&line?) {
            Ok(s) => println!("{s}"),
            Err(e) => println!("Error: {e}"),
        }
    }
    Ok(())
}
