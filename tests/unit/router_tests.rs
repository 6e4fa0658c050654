/*!
 * Tests for direct vs. pivoted routing decisions
 */

use bergamot_session::language_utils::LanguagePair;
use bergamot_session::session::{PivotRouter, Route};

#[test]
fn test_router_route_withPivotingDisabled_shouldAlwaysBeDirect() {
    let router = PivotRouter::new("en", false);
    let route = router.route("es", "fr");
    assert_eq!(
        route,
        Route::Direct {
            pair: LanguagePair::new("es", "fr")
        }
    );
}

#[test]
fn test_router_route_withSourceEqualToPivot_shouldBeDirect() {
    let router = PivotRouter::new("en", true);
    let route = router.route("en", "es");
    assert_eq!(
        route,
        Route::Direct {
            pair: LanguagePair::new("en", "es")
        }
    );
}

#[test]
fn test_router_route_withTargetEqualToPivot_shouldBeDirect() {
    let router = PivotRouter::new("en", true);
    let route = router.route("es", "en");
    assert_eq!(
        route,
        Route::Direct {
            pair: LanguagePair::new("es", "en")
        }
    );
}

#[test]
fn test_router_route_withPivotingEnabledAndDistinctEndpoints_shouldPivot() {
    let router = PivotRouter::new("en", true);
    let route = router.route("es", "fr");
    assert_eq!(
        route,
        Route::Pivot {
            source_to_pivot: LanguagePair::new("es", "en"),
            pivot_to_target: LanguagePair::new("en", "fr"),
        }
    );
}

#[test]
fn test_router_pivotingRequired_shouldHonorToggle() {
    let disabled = PivotRouter::new("en", false);
    let enabled = PivotRouter::new("en", true);

    assert!(!disabled.pivoting_required("es", "fr"));
    assert!(enabled.pivoting_required("es", "fr"));
    assert!(!enabled.pivoting_required("en", "fr"));
    assert!(!enabled.pivoting_required("es", "en"));
}

#[test]
fn test_route_pairs_shouldListHopsInInvocationOrder() {
    let router = PivotRouter::new("en", true);

    let direct = router.route("en", "es");
    let direct_pairs = direct.pairs();
    assert_eq!(direct_pairs.len(), 1);
    assert_eq!(direct_pairs[0].key(), "enes");

    let pivot = router.route("es", "fr");
    let pivot_pairs = pivot.pairs();
    assert_eq!(pivot_pairs.len(), 2);
    assert_eq!(pivot_pairs[0].key(), "esen");
    assert_eq!(pivot_pairs[1].key(), "enfr");
}

#[test]
fn test_router_pivotLanguage_shouldReturnConfiguredValue() {
    let router = PivotRouter::new("de", true);
    assert_eq!(router.pivot_language(), "de");
}
