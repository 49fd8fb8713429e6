//! Build configurations known to `tc`.

use std::fmt;

use clap::ValueEnum;

use crate::request::PropertyMap;

/// TeamCity identifier of the custom Neo4j Linux build.
pub const LINUX_BUILD_TYPE_ID: &str = "JonasHaRequests_Neo4jCustom";

/// TeamCity identifier of the HA robustness build.
pub const HAR_BUILD_TYPE_ID: &str = "JonasHaRequests_Neo4jHaRobustness";

/// Maven arguments prepended to every Maven invocation on TeamCity.
pub const MAVEN_ARGS_PREFIX: &str =
    "-DfailIfNoTests=false -Dmaven.test.failure.ignore=true --show-version ";

pub const DEFAULT_MAVEN_GOALS: &str = "clean verify";
pub const DEFAULT_MAVEN_ARGS: &str = "-DrunITs -DskipBrowser";

/// Default arguments for the HA robustness run.
pub const DEFAULT_HAR_ARGS: &str = "--duration 30m --instances 3";

/// Build configuration on the TeamCity server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    /// Neo4j on Linux.
    Linux,
    /// Neo4j HA robustness.
    Har,
}

impl BuildType {
    /// Gets the TeamCity build type identifier.
    pub fn id(&self) -> &'static str {
        match self {
            BuildType::Linux => LINUX_BUILD_TYPE_ID,
            BuildType::Har => HAR_BUILD_TYPE_ID,
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Linux => f.write_str("linux"),
            BuildType::Har => f.write_str("har"),
        }
    }
}

/// JDKs available on the Linux agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Jdk {
    #[value(name = "openjdk-8")]
    OpenJdk8,
    #[value(name = "openjdk-7")]
    OpenJdk7,
    #[value(name = "oracle-jdk-8")]
    OracleJdk8,
    #[value(name = "oracle-jdk-7")]
    OracleJdk7,
    #[value(name = "ibmjdk-8")]
    IbmJdk8,
    #[value(name = "ibmjdk-7")]
    IbmJdk7,
}

impl Jdk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jdk::OpenJdk8 => "openjdk-8",
            Jdk::OpenJdk7 => "openjdk-7",
            Jdk::OracleJdk8 => "oracle-jdk-8",
            Jdk::OracleJdk7 => "oracle-jdk-7",
            Jdk::IbmJdk8 => "ibmjdk-8",
            Jdk::IbmJdk7 => "ibmjdk-7",
        }
    }

    /// Gets the TeamCity parameter reference selecting this JDK.
    pub fn selector(&self) -> String {
        format!("%{}%", self.as_str())
    }
}

impl fmt::Display for Jdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adds some useful Maven arguments for builds on TeamCity.
pub fn tc_mvn_args(original: &str) -> String {
    format!("{}{}", MAVEN_ARGS_PREFIX, original)
}

/// Properties of a custom Linux build.
pub fn linux_properties(jdk: Jdk, maven_goals: &str, maven_args: &str) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("project-default-jdk", jdk.selector());
    props.insert("maven-goals", maven_goals);
    props.insert("maven-args", tc_mvn_args(maven_args));
    props
}

/// Properties of an HA robustness build.
pub fn har_properties(run_args: &str) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("run-args", run_args);
    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maven_args_get_prefix() {
        let args = tc_mvn_args("-Dfoo");
        assert!(args.starts_with(MAVEN_ARGS_PREFIX));
        assert_eq!(
            args,
            "-DfailIfNoTests=false -Dmaven.test.failure.ignore=true --show-version -Dfoo"
        );
    }

    #[test]
    fn linux_properties_wrap_jdk_and_prefix_args() {
        let props = linux_properties(Jdk::OracleJdk7, "clean install", "-DskipTests");

        let names: Vec<_> = props.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["project-default-jdk", "maven-goals", "maven-args"]);
        assert_eq!(props.get("project-default-jdk"), Some("%oracle-jdk-7%"));
        assert_eq!(props.get("maven-goals"), Some("clean install"));
        assert_eq!(
            props.get("maven-args"),
            Some(tc_mvn_args("-DskipTests").as_str())
        );
    }

    #[test]
    fn har_properties_carry_run_args() {
        let props = har_properties(DEFAULT_HAR_ARGS);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("run-args"), Some(DEFAULT_HAR_ARGS));
    }

    #[test]
    fn build_types_have_distinct_ids() {
        assert_eq!(BuildType::Linux.id(), LINUX_BUILD_TYPE_ID);
        assert_eq!(BuildType::Har.id(), HAR_BUILD_TYPE_ID);
        assert_ne!(BuildType::Linux.id(), BuildType::Har.id());
    }

    #[test]
    fn jdk_names_match_cli_values() {
        for jdk in Jdk::value_variants() {
            let value = jdk.to_possible_value().unwrap();
            assert_eq!(value.get_name(), jdk.as_str());
        }
        assert_eq!(Jdk::OpenJdk8.selector(), "%openjdk-8%");
    }
}
