//! Sliding-window splitter with boundary preference.

use super::{Chunk, ChunkingConfig};
use crate::error::Result;

/// Split text into overlapping chunks of at most `config.max_chunk_size`
/// characters.
///
/// A window that would cut mid-text is pulled back to the last sentence
/// boundary inside it, else to the last whitespace, else cut hard. The pulled
/// back chunk always stays longer than the overlap so the window advances.
/// The result is deterministic and concatenating the chunks while dropping the
/// leading `overlap` characters of each non-first chunk gives back the input.
pub fn split_text(text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>> {
    config.validate()?;

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = text.chars().collect();
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = chars.len();

    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let hard_end = (start + config.max_chunk_size).min(total);
        let end = if hard_end == total {
            total
        } else {
            boundary_end(&chars, start + config.overlap + 1, hard_end)
        };

        chunks.push(Chunk::new(
            &text[offsets[start]..offsets[end]],
            chunks.len(),
            start,
        ));

        if end == total {
            break;
        }
        start = end - config.overlap;
    }

    Ok(chunks)
}

/// Best end position in `min_end..=hard_end`.
fn boundary_end(chars: &[char], min_end: usize, hard_end: usize) -> usize {
    let candidates = || (min_end..=hard_end).rev();

    candidates()
        .find(|&e| e >= 2 && chars[e - 1].is_whitespace() && matches!(chars[e - 2], '.' | '?' | '!'))
        .or_else(|| candidates().find(|&e| chars[e - 1].is_whitespace()))
        .unwrap_or(hard_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.text);
            } else {
                out.extend(chunk.text.chars().skip(overlap));
            }
        }
        out
    }

    fn sample_text() -> String {
        let sentences = [
            "Welcome back to the channel.",
            "Today we are looking at how water behaves when heated.",
            "At sea level water boils at one hundred degrees Celsius!",
            "Does it boil faster with a lid?",
            "Yes, because less heat escapes",
        ];
        sentences.iter().cycle().take(40).cloned().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_single_chunk() {
        let text = "The sky is blue. Water boils at 100 degrees.";
        let chunks = split_text(text, &ChunkingConfig::default()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].start_char, 0);
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(split_text("", &ChunkingConfig::default()).unwrap().is_empty());
        assert!(split_text("  \n ", &ChunkingConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_bounds_overlap_and_reconstruction() {
        let text = sample_text();
        for (size, overlap) in [(1000, 200), (120, 30), (50, 0), (37, 36), (10, 3)] {
            let config = ChunkingConfig::new(size, overlap);
            let chunks = split_text(&text, &config).unwrap();

            assert!(chunks.len() > 1, "size {} overlap {}", size, overlap);
            for (i, chunk) in chunks.iter().enumerate() {
                assert!(chunk.char_len() <= size);
                assert!(!chunk.text.is_empty());
                assert_eq!(chunk.order, i);
            }
            for pair in chunks.windows(2) {
                let prev_end = pair[0].start_char + pair[0].char_len();
                assert_eq!(pair[1].start_char, prev_end - overlap);
            }
            assert_eq!(reconstruct(&chunks, overlap), text);
        }
    }

    #[test]
    fn test_prefers_sentence_boundary() {
        let text = "The sky is blue. Water boils at 100 degrees.";
        let chunks = split_text(text, &ChunkingConfig::new(40, 6)).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "The sky is blue. ");
        assert_eq!(chunks[1].text, "blue. Water boils at 100 degrees.");
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let text = "a".repeat(25);
        let chunks = split_text(&text, &ChunkingConfig::new(10, 2)).unwrap();

        let lens: Vec<usize> = chunks.iter().map(Chunk::char_len).collect();
        assert_eq!(lens, vec![10, 10, 9]);
        assert_eq!(reconstruct(&chunks, 2), text);
    }

    #[test]
    fn test_unicode_safety() {
        let text = "Grüße aus Köln 👋 - héllo wörld ".repeat(20);
        let config = ChunkingConfig::new(17, 4);
        let chunks = split_text(&text, &config).unwrap();

        for chunk in &chunks {
            assert!(chunk.char_len() <= 17);
        }
        assert_eq!(reconstruct(&chunks, 4), text);
    }

    #[test]
    fn test_deterministic() {
        let text = sample_text();
        let config = ChunkingConfig::new(90, 20);
        assert_eq!(split_text(&text, &config).unwrap(), split_text(&text, &config).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(split_text("hello", &ChunkingConfig::new(5, 5)).is_err());
    }
}
