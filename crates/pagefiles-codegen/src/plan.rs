//! Which globs to emit and how to classify them

use smallvec::SmallVec;

use crate::errors::CodegenError;
use crate::types::{ManifestContainer, ModuleCategory, PageFilePair, QueryKind, TimingClass};

/// Upper bound of pairs emitted for any target
pub type PairList = SmallVec<[PageFilePair; 8]>;

const ALWAYS: [PageFilePair; 2] = [
    PageFilePair::new(ModuleCategory::Isomorphic, QueryKind::None),
    PageFilePair::new(ModuleCategory::Route, QueryKind::None),
];

const CLIENT_ONLY: [PageFilePair; 4] = [
    PageFilePair::new(ModuleCategory::Client, QueryKind::None),
    PageFilePair::new(ModuleCategory::Client, QueryKind::ExportNames),
    PageFilePair::new(ModuleCategory::Server, QueryKind::ExportNames),
    PageFilePair::new(ModuleCategory::Isomorphic, QueryKind::ExportNames),
];

const SERVER_STYLES: PageFilePair = PageFilePair::new(ModuleCategory::Server, QueryKind::Styles);

const SERVER_ONLY: [PageFilePair; 2] = [
    PageFilePair::new(ModuleCategory::Server, QueryKind::None),
    PageFilePair::new(ModuleCategory::Client, QueryKind::ExportNames),
];

/// Ordered pair set for a target. No pair appears twice.
pub fn plan_pairs(is_client_build: bool, include_assets_imported_by_server: bool) -> PairList {
    let mut pairs: PairList = ALWAYS.iter().copied().collect();
    if is_client_build {
        pairs.extend(CLIENT_ONLY);
        if include_assets_imported_by_server {
            pairs.push(SERVER_STYLES);
        }
    } else {
        pairs.extend(SERVER_ONLY);
    }
    pairs
}

/// Eager only in build mode, and only for export names or route files.
///
/// Independent of the client/server target.
pub fn timing_class(pair: PageFilePair, is_build_mode: bool) -> TimingClass {
    let eager_kind = pair.query == QueryKind::ExportNames || pair.category == ModuleCategory::Route;
    if is_build_mode && eager_kind {
        TimingClass::Eager
    } else {
        TimingClass::Lazy
    }
}

/// Container a pair's combined binding is installed into
pub fn select_container(
    pair: PageFilePair,
    timing: TimingClass,
) -> Result<ManifestContainer, CodegenError> {
    let container = match (pair.query, timing) {
        (QueryKind::ExportNames, TimingClass::Eager) => ManifestContainer::ExportNamesEager,
        (QueryKind::ExportNames, TimingClass::Lazy) => ManifestContainer::ExportNamesLazy,
        (QueryKind::Styles, TimingClass::Lazy) if pair.category == ModuleCategory::Server => {
            ManifestContainer::StylesOnly
        }
        (QueryKind::Styles, TimingClass::Lazy) => {
            return Err(CodegenError::unreachable_pair(
                pair,
                "styles are only extracted from server files",
            ));
        }
        (QueryKind::Styles, TimingClass::Eager) => {
            return Err(CodegenError::unreachable_pair(
                pair,
                "styles are never loaded eagerly",
            ));
        }
        (QueryKind::None, TimingClass::Eager) => ManifestContainer::Eager,
        (QueryKind::None, TimingClass::Lazy) => ManifestContainer::Lazy,
    };
    Ok(container)
}

#[cfg(test)]
mod tests {
    use crate::plan::*;

    fn pair(category: ModuleCategory, query: QueryKind) -> PageFilePair {
        PageFilePair::new(category, query)
    }

    #[test]
    fn test_route_is_eager_in_build_mode() {
        assert_eq!(
            timing_class(pair(ModuleCategory::Route, QueryKind::None), true),
            TimingClass::Eager
        );
        assert_eq!(
            timing_class(pair(ModuleCategory::Isomorphic, QueryKind::None), true),
            TimingClass::Lazy
        );
    }

    #[test]
    fn test_everything_is_lazy_in_dev() {
        for category in ModuleCategory::ALL {
            for query in [QueryKind::None, QueryKind::ExportNames, QueryKind::Styles] {
                assert_eq!(timing_class(pair(category, query), false), TimingClass::Lazy);
            }
        }
    }

    #[test]
    fn test_export_names_eager_in_build_mode() {
        let p = pair(ModuleCategory::Client, QueryKind::ExportNames);
        assert_eq!(timing_class(p, true), TimingClass::Eager);
        assert!(matches!(
            select_container(p, TimingClass::Eager),
            Ok(ManifestContainer::ExportNamesEager)
        ));
    }

    #[test]
    fn test_styles_go_to_styles_only() {
        let p = pair(ModuleCategory::Server, QueryKind::Styles);
        assert_eq!(timing_class(p, true), TimingClass::Lazy);
        assert!(matches!(
            select_container(p, TimingClass::Lazy),
            Ok(ManifestContainer::StylesOnly)
        ));
    }

    #[test]
    fn test_eager_styles_is_an_invariant_failure() {
        let p = pair(ModuleCategory::Server, QueryKind::Styles);
        assert!(matches!(
            select_container(p, TimingClass::Eager),
            Err(CodegenError::Invariant(_))
        ));
    }

    #[test]
    fn test_styles_outside_server_files_is_unreachable() {
        let p = pair(ModuleCategory::Client, QueryKind::Styles);
        assert!(select_container(p, TimingClass::Lazy).is_err());
    }

    #[test]
    fn test_server_target_pairs() {
        let pairs = plan_pairs(false, true);
        assert_eq!(
            pairs.as_slice(),
            &[
                pair(ModuleCategory::Isomorphic, QueryKind::None),
                pair(ModuleCategory::Route, QueryKind::None),
                pair(ModuleCategory::Server, QueryKind::None),
                pair(ModuleCategory::Client, QueryKind::ExportNames),
            ]
        );
        assert_eq!(plan_pairs(false, false), pairs);
    }

    #[test]
    fn test_client_target_styles_depend_on_config() {
        let with_styles = plan_pairs(true, true);
        let without_styles = plan_pairs(true, false);
        assert_eq!(with_styles.len(), 7);
        assert_eq!(without_styles.len(), 6);
        assert_eq!(with_styles.last(), Some(&SERVER_STYLES));
        assert!(!without_styles.contains(&SERVER_STYLES));
    }
}
