//! Tests for the source module.

use super::*;
use crate::error::Error;

fn test_registry() -> MirrorRegistry {
    let mut registry = MirrorRegistry::new();
    registry.insert("github", ["https://github.com"]);
    registry.insert("gitlab", ["https://gitlab.com"]);
    registry.insert(
        "onion",
        [
            "ssh://git@fszyuaceipjhnbyy44mtfmoocwzgzunmdu46votrm5c72poeeffa.onion:22",
            "ssh://git@xg5jwb4xxwajkhur2ahuhtdwifniyoyvbm5h4yzawawwjziol3jq.onion:22",
            "ssh://git@23aj5gsggiufl6qhfbmzwd334qyhgaugbh2g3ty4ecl3jikmt5ja.onion:22",
        ],
    );
    registry.insert("file", ["/srv/mirrors"]);
    registry
}

mod specifier_tests {
    use super::*;

    #[test]
    fn parse_basic() {
        let spec = SourceSpec::parse("github:org/repo@^1.2.3").unwrap();
        assert_eq!(spec.scheme, "github");
        assert_eq!(spec.path, "org/repo");
        assert_eq!(spec.range, "^1.2.3");
    }

    #[test]
    fn path_may_contain_colon_and_at() {
        // Scheme ends at the first ':', range starts at the last '@'.
        let spec = SourceSpec::parse("onion:git@host:org/repo@~1.1.0").unwrap();
        assert_eq!(spec.scheme, "onion");
        assert_eq!(spec.path, "git@host:org/repo");
        assert_eq!(spec.range, "~1.1.0");
    }

    #[test]
    fn missing_colon_is_malformed() {
        let result = SourceSpec::parse("github-org-repo@^1.0.0");
        assert!(matches!(result, Err(Error::MalformedSpecifier { .. })));
    }

    #[test]
    fn missing_at_is_malformed() {
        let result = SourceSpec::parse("github:org/repo");
        assert!(matches!(result, Err(Error::MalformedSpecifier { .. })));
    }

    #[test]
    fn empty_range_is_malformed() {
        let result = SourceSpec::parse("github:org/repo@");
        assert!(matches!(result, Err(Error::MalformedSpecifier { .. })));
    }
}

mod expansion_tests {
    use super::*;

    #[test]
    fn github_single_mirror() {
        let source = test_registry().expand("github:org/repo@~1.2.3").unwrap();
        assert_eq!(source.git, vec!["https://github.com/org/repo.git"]);
        assert_eq!(source.version, "~1.2.3");
    }

    #[test]
    fn onion_preserves_mirror_order() {
        let registry = test_registry();
        let source = registry.expand("onion:org/repo@^1.0.0").unwrap();
        let mirrors = registry.mirrors("onion").unwrap();

        assert_eq!(source.git.len(), mirrors.len());
        for (candidate, base) in source.git.iter().zip(mirrors) {
            assert_eq!(candidate, &format!("{base}/org/repo.git"));
        }
    }

    #[test]
    fn file_scheme_resolves_local_git_dir() {
        let source = test_registry().expand("file:repo@~1.1.0").unwrap();
        assert_eq!(source.git, vec!["/srv/mirrors/repo/.git"]);
        assert_eq!(source.version, "~1.1.0");
    }

    #[test]
    fn unknown_scheme_errors() {
        let result = test_registry().expand("sourcehut:org/repo@^1.0.0");
        assert!(matches!(
            result,
            Err(Error::UnknownScheme { scheme }) if scheme == "sourcehut"
        ));
    }

    #[test]
    fn scheme_without_mirrors_is_unknown() {
        let mut registry = test_registry();
        registry.insert("dead", Vec::<String>::new());

        let result = registry.expand("dead:org/repo@^1.0.0");
        assert!(matches!(result, Err(Error::UnknownScheme { .. })));
    }

    #[test]
    fn expansion_is_pure() {
        let registry = test_registry();
        let first = registry.expand("onion:org/repo@^2.0.0").unwrap();
        let second = registry.expand("onion:org/repo@^2.0.0").unwrap();
        assert_eq!(first, second);
    }
}
