//! Offline, deterministic bag-of-words embedder.
//!
//! Each lower-cased alphanumeric token is hashed (FNV-1a) into one of `dim`
//! buckets. Texts sharing words get a positive cosine similarity, which is
//! enough for local runs without an API key and for tests.

use std::{future::Future, pin::Pin};

use crate::{EmbeddingsProvider, RagError};

#[derive(Clone, Debug)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    /// Synchronous core shared by the async trait impl.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let bucket = fnv1a(&token.to_lowercase()) % self.dim as u64;
            v[bucket as usize] += 1.0;
        }
        v
    }
}

impl EmbeddingsProvider for HashingEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.vectorize(text)) })
    }

    fn model_id(&self) -> &str {
        "hashing-bow"
    }
}

fn fnv1a(s: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in s.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_punctuation_do_not_matter() {
        let e = HashingEmbedder::new(64);
        assert_eq!(e.vectorize("Premium Plan!"), e.vectorize("premium, plan"));
        assert_eq!(e.vectorize("").iter().sum::<f32>(), 0.0);
    }
}
