//! Sectioned text input and JSON output.
//!
//! Input is whitespace-tokenized; each section starts on a line whose trimmed
//! content is the header. Anything between the end of one section's tokens
//! and the next header line is ignored.
//!
//! ```text
//! USER_PROFILE
//! <n>  n × (<tag> <value>)
//! WORKS
//! <n>  n × (<id> <k> k × (<tag> <value>) <view_count> <interaction_time>)
//! SIMILAR_USERS
//! <n>  n × (<id> <similarity> <m> m × <item_id>)
//! PARAMS
//! <num_recommendations> <random_factor>
//! METRICS_CONFIG
//! <use_metrics 0|1> <weight_views> <weight_time> <weight_tags>
//! ```

use serde::Serialize;
use std::io::Write;
use std::str::SplitWhitespace;

use crate::error::{RecError, Result};
use crate::model::{Catalog, Item, MetricsConfig, Peer, ScoredEntry, Tag, UserProfile};
use crate::pipeline::RecommendationRequest;

const USER_PROFILE: &str = "USER_PROFILE";
const WORKS: &str = "WORKS";
const SIMILAR_USERS: &str = "SIMILAR_USERS";
const PARAMS: &str = "PARAMS";
const METRICS_CONFIG: &str = "METRICS_CONFIG";

struct TokenReader<'a> {
    lines: Vec<&'a str>,
    next_line: usize,
    /// 1-based number of the line `pending` was taken from.
    current_line: usize,
    pending: SplitWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    fn new(input: &'a str) -> Self {
        TokenReader {
            lines: input.lines().collect(),
            next_line: 0,
            current_line: 0,
            pending: "".split_whitespace(),
        }
    }

    /// Skip to the line after the next `header` line, dropping unread tokens.
    fn seek_section(&mut self, header: &'static str) -> Result<()> {
        let found = self.lines[self.next_line..]
            .iter()
            .position(|line| line.trim() == header)
            .ok_or(RecError::MissingSection(header))?;
        self.next_line += found + 1;
        self.current_line = self.next_line;
        self.pending = "".split_whitespace();
        Ok(())
    }

    fn token(&mut self, what: &str) -> Result<&'a str> {
        loop {
            if let Some(tok) = self.pending.next() {
                return Ok(tok);
            }
            if self.next_line >= self.lines.len() {
                return Err(self.error(format!("unexpected end of input, expected {}", what)));
            }
            self.pending = self.lines[self.next_line].split_whitespace();
            self.next_line += 1;
            self.current_line = self.next_line;
        }
    }

    fn count(&mut self, what: &str) -> Result<usize> {
        let tok = self.token(what)?;
        tok.parse()
            .map_err(|_| self.error(format!("invalid {} `{}`, expected a non-negative integer", what, tok)))
    }

    fn integer(&mut self, what: &str) -> Result<i64> {
        let tok = self.token(what)?;
        tok.parse()
            .map_err(|_| self.error(format!("invalid {} `{}`, expected an integer", what, tok)))
    }

    fn real(&mut self, what: &str) -> Result<f64> {
        let tok = self.token(what)?;
        match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.error(format!("invalid {} `{}`, expected a finite number", what, tok))),
        }
    }

    fn non_negative(&mut self, what: &str) -> Result<f64> {
        let v = self.real(what)?;
        if v < 0.0 {
            return Err(self.error(format!("{} must be >= 0, got {}", what, v)));
        }
        Ok(v)
    }

    fn tags(&mut self) -> Result<Vec<Tag>> {
        let n = self.count("tag count")?;
        (0..n)
            .map(|_| -> Result<Tag> {
                let name = self.token("tag name")?;
                let value = self.real("tag value")?;
                Ok(Tag::new(name, value))
            })
            .collect()
    }

    fn error(&self, message: String) -> RecError {
        RecError::Parse {
            line: self.current_line,
            message,
        }
    }
}

/// Parse a full request from the sectioned text format.
pub fn parse_request(input: &str) -> Result<RecommendationRequest> {
    let mut reader = TokenReader::new(input);

    reader.seek_section(USER_PROFILE)?;
    let user = UserProfile::new(reader.tags()?);

    reader.seek_section(WORKS)?;
    let num_items = reader.count("item count")?;
    let mut items = Vec::with_capacity(num_items);
    for _ in 0..num_items {
        let id = reader.token("item id")?;
        let tags = reader.tags()?;
        let view_count = reader.non_negative("view count")?;
        let interaction_time = reader.non_negative("interaction time")?;
        items.push(Item::new(id, tags, view_count, interaction_time));
    }
    let catalog = Catalog::new(items)?;

    reader.seek_section(SIMILAR_USERS)?;
    let num_peers = reader.count("similar user count")?;
    let mut peers = Vec::with_capacity(num_peers);
    for _ in 0..num_peers {
        let id = reader.token("similar user id")?;
        let similarity = reader.real("similarity")?;
        let num_liked = reader.count("liked item count")?;
        let liked = (0..num_liked)
            .map(|_| reader.token("liked item id").map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        peers.push(Peer::new(id, similarity, liked));
    }

    reader.seek_section(PARAMS)?;
    let num_recommendations = reader.integer("number of recommendations")?;
    let random_factor = reader.real("random factor")?;

    reader.seek_section(METRICS_CONFIG)?;
    let use_metrics = reader.integer("use_metrics flag")? != 0;
    let metrics = MetricsConfig {
        use_metrics,
        weight_views: reader.real("view weight")?,
        weight_time: reader.real("time weight")?,
        weight_tags: reader.real("tag weight")?,
    };

    Ok(RecommendationRequest {
        user,
        catalog,
        peers,
        metrics,
        num_recommendations,
        random_factor,
    })
}

#[derive(Serialize)]
struct Response<'a> {
    recommendations: &'a [ScoredEntry],
}

/// Render the final list as `{"recommendations": [{"id": .., "score": ..}, ..]}`.
pub fn to_json(recommendations: &[ScoredEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Response { recommendations })?)
}

pub fn write_json<W: Write>(mut out: W, recommendations: &[ScoredEntry]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, &Response { recommendations })?;
    writeln!(out)?;
    Ok(())
}
