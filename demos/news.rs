//! FIX 4.2 News: repeating groups through encode and dictionary decode.
use fixmap::messages::fields::*;
use fixmap::messages::fix42::{self, LineOfText, News};
use fixmap::prelude::{Decoder, EncoderConfig, FieldAccess, FixField, TypedMessage, encode};
use tracing::info;
mod common;
use common::{init_logging, printable};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let dict = fix42::dictionary();

    let mut news = News::with_required(Headline::new("Rates unchanged".to_string()));
    for line in ["Policy rate held at 5.25%", "Next meeting in six weeks"] {
        news.add_group(LineOfText::with_required(Text::new(line.to_string())));
    }
    news.set(Urgency::new('0'));

    let bytes = encode(news.message(), EncoderConfig::default());
    info!("Encoded: {}", printable(&bytes));

    let decoded = News::try_from(Decoder::new().with_dictionary(&dict).decode(&bytes)?)?;
    for index in 1..=decoded.group_count::<LineOfText>() {
        let line = decoded.get_group::<LineOfText>(index)?;
        info!("Line {}: {}", index, line.get::<Text>()?.into_value());
    }
    info!("Round trip equal: {}", decoded.message() == news.message());
    Ok(())
}
