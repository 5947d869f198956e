use std::path::Path;

use tracing::debug;

use crate::error::{ProbeError, Result};

pub const MODEL_NAME: &str = "model name";

/// One logical processor block from `/proc/cpuinfo`, attributes in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Processor {
    attributes: Vec<(String, String)>,
}

impl Processor {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn model_name(&self) -> Option<&str> {
        self.get(MODEL_NAME)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    // A repeated key keeps its first position and takes the latest value.
    fn insert(&mut self, key: String, value: String) {
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }
}

pub fn parse_cpuinfo(text: &str) -> Vec<Processor> {
    let mut processors = Vec::new();
    let mut current = Processor::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                processors.push(std::mem::take(&mut current));
            }
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => current.insert(key.trim().to_string(), value.trim().to_string()),
            None => current.insert(line.trim().to_string(), String::new()),
        }
    }

    if !current.is_empty() {
        processors.push(current);
    }

    processors
}

pub fn read_cpuinfo(path: &Path) -> Result<Vec<Processor>> {
    let text = super::read_to_string(path)?;
    let processors = parse_cpuinfo(&text);
    debug!(path = %path.display(), count = processors.len(), "parsed cpuinfo");
    Ok(processors)
}

/// Model name of every processor, in order. Fails on the first record that lacks one.
pub fn model_names(processors: &[Processor]) -> Result<Vec<&str>> {
    processors
        .iter()
        .enumerate()
        .map(|(index, p)| {
            p.model_name().ok_or_else(|| {
                let keys: Vec<&str> = p.attributes().map(|(k, _)| k).collect();
                debug!(index, ?keys, "processor record has no model name");
                ProbeError::MissingAttribute {
                    index,
                    key: MODEL_NAME,
                }
            })
        })
        .collect()
}
