/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

use crate::fields::{EncodedText, EncodedTextLen, Headline, LinesOfText, OrigTime, Text, Urgency};
use crate::{fix_group, fix_message};

fix_group! {
    /// One line of text in a News message.
    pub struct LineOfText: count = LinesOfText, delimiter = Text {
        required: [text: Text],
        optional: [EncodedTextLen, EncodedText],
        groups: [],
    }
}

fix_message! {
    /// FIX 4.2 News (B).
    pub struct News: "B", App {
        required: [headline: Headline],
        optional: [OrigTime, Urgency],
        groups: [],
        required_groups: [LineOfText],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixmap_core::{FieldAccess, FixField, TypedGroup, TypedMessage};

    fn line(text: &str) -> LineOfText {
        LineOfText::with_required(Text::new(text.to_string()))
    }

    #[test]
    fn test_news_lines() {
        let mut news = News::with_required(Headline::new("Rates unchanged".to_string()));
        assert_eq!(news.missing_required(), vec![33]);

        news.add_group(line("first"));
        news.add_group(line("second"));
        news.add_group(line("third"));

        assert_eq!(news.group_count::<LineOfText>(), 3);
        assert_eq!(news.message().body().get_as::<u32>(33).unwrap(), 3);
        assert_eq!(
            news.get_group::<LineOfText>(1).unwrap().get::<Text>().unwrap().into_value(),
            "first"
        );
        assert!(news.get_group::<LineOfText>(4).unwrap_err().is_not_found());
        assert!(news.missing_required().is_empty());
    }

    #[test]
    fn test_group_definition() {
        let def = LineOfText::definition();
        assert_eq!(def.count_tag, 33);
        assert_eq!(def.delimiter_tag, 58);
        assert_eq!(def.name, "LinesOfText");
        assert_eq!(LineOfText::FIELDS, &[58, 354, 355]);

        let news = News::definition();
        assert!(news.group(33).unwrap().required);
        assert_eq!(news.required_tags().collect::<Vec<_>>(), vec![148, 33]);
    }
}
