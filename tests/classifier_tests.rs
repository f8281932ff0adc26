use shapescout_core::prototype::{self, MODELS};
use shapescout_core::{Features, Shape, rules};

fn features_from(reference: [f64; 5]) -> Features {
    Features {
        area: 20_000.0,
        circularity: reference[0],
        solidity: reference[1],
        ellipse_ratio: reference[2],
        vertices: reference[3] as usize,
        aspect_ratio: reference[4],
    }
}

#[test]
fn test_classifiers_agree_on_canonical_views() {
    // The first reference of every model is the head-on view. Both
    // classifiers name the same shape for it, except pyramid: its
    // head-on silhouette is too square for the cascade and is covered
    // by the prototype path instead.
    for model in &MODELS {
        if model.shape == Shape::Pyramid {
            continue;
        }
        let canonical = features_from(model.references[0]);

        assert_eq!(
            rules::classify(&canonical),
            Some(model.shape),
            "rules on {}",
            model.shape
        );

        let (shape, confidence) = prototype::classify(&canonical).unwrap();
        assert_eq!(shape, model.shape);
        assert!(confidence > 0.99);
    }
}

#[test]
fn test_prototype_recovers_shallow_pyramid() {
    // Aspect 1.50 sits below the cascade's elongation guard, so the
    // rule path refuses the head-on pyramid; the prototype path is the
    // one that picks it up.
    let shallow = features_from(MODELS[4].references[0]);
    assert_eq!(MODELS[4].shape, Shape::Pyramid);

    assert_eq!(rules::classify(&shallow), None);
    let (shape, confidence) = prototype::classify(&shallow).unwrap();
    assert_eq!(shape, Shape::Pyramid);
    assert!(confidence > 0.99);
}

#[test]
fn test_classifiers_agree_on_garbage() {
    // A concave, ragged blob: both paths refuse it.
    let blob = features_from([0.25, 0.40, 1.2, 14.0, 1.1]);
    assert_eq!(rules::classify(&blob), None);
    assert_eq!(prototype::classify(&blob), None);
}

#[test]
fn test_steep_pyramid_satisfies_both_paths() {
    let steep = features_from(MODELS[4].references[1]);
    assert_eq!(rules::classify(&steep), Some(Shape::Pyramid));
    let (shape, _) = prototype::classify(&steep).unwrap();
    assert_eq!(shape, Shape::Pyramid);
}
