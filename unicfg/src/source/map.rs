//! In-memory property source.
//!
//! [`MapSource`] holds the explicitly supplied entries of one configuration
//! layer. Keys are stored by canonical form, so `longPolling.timeout` and
//! `long-polling.timeout` address the same entry.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value as YamlValue;

use super::{PropertySource, RawValue};
use crate::error::{Error, Result};
use crate::key::PropertyKey;

/// Explicit key/value entries of one configuration layer.
///
/// # Examples
///
/// ```
/// use unicfg::source::{MapSource, PropertySource, RawValue};
/// use unicfg::PropertyKey;
///
/// let source = MapSource::from_pairs([
///     ("camunda.data.urls.0", "http://node1:9200"),
///     ("camunda.data.urls.1", "http://node2:9200"),
/// ])
/// .unwrap();
///
/// let urls = PropertyKey::new("camunda.data.urls").unwrap();
/// assert_eq!(
///     source.raw_value(&urls),
///     Some(RawValue::Indexed(vec![
///         "http://node1:9200".into(),
///         "http://node2:9200".into(),
///     ]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    entries: BTreeMap<PropertyKey, String>,
}

impl MapSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from key/value pairs. Later pairs overwrite earlier
    /// ones with the same canonical key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed key.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut source = Self::new();
        for (key, value) in pairs {
            source.insert(PropertyKey::new(key.as_ref())?, value);
        }
        Ok(source)
    }

    /// Parses properties text: one `key=value` or `key: value` entry per
    /// line, `#` and `!` starting comment lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a line without separator and
    /// [`Error::InvalidKey`] for a malformed key.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::source::MapSource;
    ///
    /// let source = MapSource::from_properties_str(
    ///     "# broker settings\nzeebe.broker.cluster.nodeId=7\nzeebe.broker.network.host: 0.0.0.0\n",
    /// )
    /// .unwrap();
    /// assert_eq!(source.len(), 2);
    /// ```
    pub fn from_properties_str(text: &str) -> Result<Self> {
        let mut source = Self::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let separator = line
                .find(|c: char| c == '=' || c == ':')
                .ok_or_else(|| Error::Validation {
                    field: format!("line {}", number + 1),
                    message: format!("expected 'key=value', found '{line}'"),
                })?;

            let key = PropertyKey::new(line[..separator].trim())?;
            source.insert(key, line[separator + 1..].trim());
        }

        Ok(source)
    }

    /// Parses a YAML document, flattening nested mappings into dotted keys
    /// and sequences into indexed entries. A null value is an explicitly
    /// set empty value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalogue`] if the document is not valid YAML and
    /// [`Error::Validation`] if its root is not a mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::source::{MapSource, PropertySource, RawValue};
    /// use unicfg::PropertyKey;
    ///
    /// let source = MapSource::from_yaml_str(
    ///     "zeebe:\n  gateway:\n    longPolling:\n      timeout: 2\n",
    /// )
    /// .unwrap();
    /// let key = PropertyKey::new("zeebe.gateway.long-polling.timeout").unwrap();
    /// assert_eq!(source.raw_value(&key), Some(RawValue::Text("2".into())));
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let document: YamlValue = serde_yaml::from_str(text)?;
        let mut source = Self::new();

        match document {
            YamlValue::Null => {}
            YamlValue::Mapping(_) => flatten_yaml(&mut source, None, &document)?,
            _ => {
                return Err(Error::Validation {
                    field: "document".into(),
                    message: "the root of a YAML configuration must be a mapping".into(),
                })
            }
        }

        Ok(source)
    }

    /// Loads a file, choosing the parser from the extension: `.yaml`/`.yml`
    /// as YAML, everything else as properties text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be read, or the parse
    /// error of the chosen parser.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Self::from_properties_str(&text),
        }
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: PropertyKey, value: impl Into<String>) {
        // Re-insert so the most recent spelling of the key is kept.
        self.entries.remove(&key);
        self.entries.insert(key, value.into());
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    fn indexed_children(&self, key: &PropertyKey) -> Vec<String> {
        let mut children: Vec<(usize, &String)> = self
            .entries
            .iter()
            .filter_map(|(candidate, value)| key.child_index(candidate).map(|i| (i, value)))
            .collect();
        children.sort_by_key(|(index, _)| *index);
        children.into_iter().map(|(_, value)| value.clone()).collect()
    }
}

impl PropertySource for MapSource {
    fn raw_value(&self, key: &PropertyKey) -> Option<RawValue> {
        if let Some(text) = self.entries.get(key) {
            return Some(RawValue::Text(text.clone()));
        }

        let children = self.indexed_children(key);
        if children.is_empty() {
            None
        } else {
            Some(RawValue::Indexed(children))
        }
    }
}

fn flatten_yaml(
    source: &mut MapSource,
    prefix: Option<&PropertyKey>,
    value: &YamlValue,
) -> Result<()> {
    match value {
        YamlValue::Mapping(mapping) => {
            for (name, child) in mapping {
                let name = yaml_scalar(name).ok_or_else(|| Error::Validation {
                    field: prefix.map_or_else(String::new, ToString::to_string),
                    message: "mapping keys must be scalars".into(),
                })?;
                let key = match prefix {
                    Some(parent) => PropertyKey::new(format!("{parent}.{name}"))?,
                    None => PropertyKey::new(name)?,
                };
                flatten_yaml(source, Some(&key), child)?;
            }
        }
        YamlValue::Sequence(items) => {
            let Some(parent) = prefix else {
                return Ok(());
            };
            for (index, item) in items.iter().enumerate() {
                flatten_yaml(source, Some(&parent.index(index)), item)?;
            }
        }
        YamlValue::Tagged(tagged) => flatten_yaml(source, prefix, &tagged.value)?,
        scalar => {
            if let Some(key) = prefix {
                source.insert(key.clone(), yaml_scalar(scalar).unwrap_or_default());
            }
        }
    }
    Ok(())
}

fn yaml_scalar(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => Some(String::new()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> PropertyKey {
        PropertyKey::new(raw).unwrap()
    }

    #[test]
    fn test_from_pairs_last_wins() {
        let source =
            MapSource::from_pairs([("a.longPolling", "1"), ("a.long-polling", "2")]).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(
            source.raw_value(&key("a.long_polling")),
            Some(RawValue::Text("2".into()))
        );
        assert_eq!(source.iter().next().unwrap().0.as_str(), "a.long-polling");
    }

    #[test]
    fn test_unset_key() {
        let source = MapSource::from_pairs([("a.b", "1")]).unwrap();
        assert_eq!(source.raw_value(&key("a.c")), None);
        assert!(!source.is_explicitly_set(&key("a.c")));
        assert!(source.is_explicitly_set(&key("a.b")));
    }

    #[test]
    fn test_empty_value_is_explicit() {
        let source = MapSource::from_properties_str("a.b=\n").unwrap();
        assert!(source.is_explicitly_set(&key("a.b")));
        assert_eq!(source.raw_value(&key("a.b")), Some(RawValue::Text(String::new())));
    }

    #[test]
    fn test_indexed_entries_sorted_numerically() {
        let source = MapSource::from_pairs([
            ("list[10]", "k"),
            ("list[2]", "c"),
            ("list.0", "a"),
            ("list.name", "ignored"),
            ("list.1.host", "ignored"),
        ])
        .unwrap();

        assert_eq!(
            source.raw_value(&key("list")),
            Some(RawValue::Indexed(vec!["a".into(), "c".into(), "k".into()]))
        );
    }

    #[test]
    fn test_text_value_shadows_indexed_entries() {
        let source = MapSource::from_pairs([("list", "x,y"), ("list.0", "a")]).unwrap();
        assert_eq!(source.raw_value(&key("list")), Some(RawValue::Text("x,y".into())));
    }

    #[test]
    fn test_properties_parsing() {
        let text = "\
# comment
! also a comment

zeebe.broker.cluster.nodeId = 7
zeebe.broker.network.host: 0.0.0.0
camunda.urls=http://a:1,http://b:2
";
        let source = MapSource::from_properties_str(text).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(
            source.raw_value(&key("zeebe.broker.cluster.node-id")),
            Some(RawValue::Text("7".into()))
        );
        // Only the first separator splits the line.
        assert_eq!(
            source.raw_value(&key("camunda.urls")),
            Some(RawValue::Text("http://a:1,http://b:2".into()))
        );
    }

    #[test]
    fn test_properties_missing_separator() {
        let err = MapSource::from_properties_str("a.b=1\nnot a property\n").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "line 2"));
    }

    #[test]
    fn test_yaml_flattening() {
        let yaml = "
camunda:
  data:
    secondary-storage:
      elasticsearch:
        urls:
          - http://node1:9200
          - http://node2:9200
        create-schema: false
        number-of-shards: 3
  rest:
    filters:
      - id: first
        class-name: com.example.First
  empty:
";
        let source = MapSource::from_yaml_str(yaml).unwrap();
        assert_eq!(
            source.raw_value(&key("camunda.data.secondary-storage.elasticsearch.urls")),
            Some(RawValue::Indexed(vec![
                "http://node1:9200".into(),
                "http://node2:9200".into()
            ]))
        );
        assert_eq!(
            source.raw_value(&key("camunda.data.secondaryStorage.elasticsearch.createSchema")),
            Some(RawValue::Text("false".into()))
        );
        assert_eq!(
            source.raw_value(&key("camunda.data.secondary-storage.elasticsearch.number-of-shards")),
            Some(RawValue::Text("3".into()))
        );
        assert_eq!(
            source.raw_value(&key("camunda.rest.filters[0].class-name")),
            Some(RawValue::Text("com.example.First".into()))
        );
        assert!(source.is_explicitly_set(&key("camunda.empty")));
    }

    #[test]
    fn test_yaml_flow_sequence_is_indexed() {
        let source = MapSource::from_yaml_str("a:\n  b: [x, y]\n").unwrap();
        assert_eq!(
            source.raw_value(&key("a.b")),
            Some(RawValue::Indexed(vec!["x".into(), "y".into()]))
        );
    }

    #[test]
    fn test_yaml_root_must_be_mapping() {
        assert!(MapSource::from_yaml_str("").unwrap().is_empty());
        assert!(matches!(
            MapSource::from_yaml_str("- a\n- b\n"),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(MapSource::from_yaml_str("a: [b"), Err(Error::Catalogue(_))));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("application.yaml");
        std::fs::write(&yaml, "zeebe:\n  broker:\n    cluster:\n      nodeId: 3\n").unwrap();
        let source = MapSource::from_file(&yaml).unwrap();
        assert!(source.is_explicitly_set(&key("zeebe.broker.cluster.node-id")));

        let properties = dir.path().join("application.properties");
        std::fs::write(&properties, "zeebe.broker.cluster.nodeId=3\n").unwrap();
        assert_eq!(MapSource::from_file(&properties).unwrap(), source);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(MapSource::from_file(&missing), Err(Error::FileRead { .. })));
    }
}
