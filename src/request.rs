//! Build request construction for the TeamCity build queue.

use std::borrow::Cow;

use crate::preset::BuildType;

/// Comment attached to every queued build.
pub const BUILD_COMMENT: &str = "Triggered from CLI";

/// Build properties, kept in insertion order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    /// Creates an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property. An existing property with the same name keeps its
    /// position and gets the new value, which returns the old one.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Gets the value of a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = PropertyMap::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

/// A single request to queue a build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Build configuration to queue.
    pub build_type: BuildType,
    /// Whether the build is personal.
    pub personal: bool,
    /// Branch to check out.
    pub branch: String,
    /// Remote where the branch exists.
    pub remote: String,
    /// Additional build properties.
    pub properties: PropertyMap,
}

impl BuildRequest {
    pub fn new<B, R>(build_type: BuildType, branch: B, remote: R) -> Self
    where
        B: Into<String>,
        R: Into<String>,
    {
        Self {
            build_type,
            personal: false,
            branch: branch.into(),
            remote: remote.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn personal(mut self, personal: bool) -> Self {
        self.personal = personal;
        self
    }

    pub fn properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    /// Renders the request as the XML document TeamCity expects.
    pub fn to_xml(&self) -> String {
        let props = format_properties(&self.properties);
        request_xml(
            self.build_type.id(),
            self.personal,
            &self.branch,
            &self.remote,
            Some(&props),
        )
    }
}

/// Formats properties as `<property name=NAME value=VALUE/>` tags, one per
/// line, in iteration order.
pub fn format_properties(props: &PropertyMap) -> String {
    let mut xml = String::new();
    for (name, value) in props.iter() {
        xml.push_str(&format!(
            "\n    <property name=\"{}\" value=\"{}\"/>",
            escape_attr(name),
            escape_attr(value)
        ));
    }
    xml
}

/// Formats an XML build request.
///
/// `properties` is an already formatted fragment (see [`format_properties`])
/// and is inserted after the implicit `remote` and `branch` properties.
pub fn request_xml(
    build_type_id: &str,
    personal: bool,
    branch: &str,
    remote: &str,
    properties: Option<&str>,
) -> String {
    format!(
        r#"
<build personal="{personal}" branchName="{branch}">
  <buildType id="{build_type_id}"/>
  <comment><text>{comment}</text></comment>
  <properties>
    <property name="remote" value="{remote}"/>
    <property name="branch" value="{branch}"/>{properties}
  </properties>
</build>
"#,
        personal = personal,
        branch = escape_attr(branch),
        build_type_id = escape_attr(build_type_id),
        comment = BUILD_COMMENT,
        remote = escape_attr(remote),
        properties = properties.unwrap_or_default(),
    )
}

/// Escapes a string for use inside a double-quoted XML attribute.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
