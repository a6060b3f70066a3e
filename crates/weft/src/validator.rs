//! Construction-time checks of a merged registry against a configuration.

use std::borrow::Cow;
use std::collections::hash_map::Entry;

use fxhash::FxHashMap;
use tracing::{trace, warn};

use crate::config::Configuration;
use crate::descriptor::ConverterKind;
use crate::error::WeftError;
use crate::polymorphic::Hierarchy;
use crate::registry::Registry;
use crate::type_key::TypeKey;

/// Fails on the first polymorphic hierarchy whose tags would be ambiguous on the wire.
///
/// Under `use_array_polymorphism` the tag is not part of the object, so nothing is checked.
/// Tags are scoped to their hierarchy: two hierarchies reusing a tag is fine.
///
/// # Errors
///
/// Returns [`WeftError::AmbiguousDiscriminator`] when two subtypes of one hierarchy share a
/// tag, [`WeftError::InvalidConfiguration`] when a subtype encodes to a scalar or an array, or
/// [`WeftError::DiscriminatorConflict`] when a subtype declares a field named like the class
/// discriminator.
pub fn validate(configuration: &Configuration, registry: &Registry) -> Result<(), WeftError> {
    if configuration.use_array_polymorphism() {
        trace!("Array polymorphism in use, discriminator checks skipped");
        return Ok(());
    }

    let mut hierarchies: Vec<Hierarchy> = registry.hierarchies().collect();
    hierarchies.sort_by_key(|h| h.base().name());

    let discriminator = configuration.class_discriminator();
    for hierarchy in &hierarchies {
        check_tags(hierarchy)
            .and_then(|()| check_kinds(hierarchy))
            .and_then(|()| check_fields(hierarchy, discriminator))
            .inspect_err(|err| warn!(hierarchy = hierarchy.serial_name(), code = err.code(), "{err}"))?;
        trace!(
            hierarchy = hierarchy.serial_name(),
            subtypes = hierarchy.subtypes().len(),
            "Polymorphic hierarchy validated"
        );
    }
    Ok(())
}

fn check_tags(hierarchy: &Hierarchy) -> Result<(), WeftError> {
    let mut seen: FxHashMap<&str, TypeKey> = FxHashMap::default();
    for subtype in hierarchy.subtypes() {
        match seen.entry(subtype.tag()) {
            Entry::Vacant(slot) => {
                slot.insert(subtype.key());
            },
            Entry::Occupied(slot) => {
                return Err(WeftError::AmbiguousDiscriminator {
                    hierarchy: Cow::Owned(hierarchy.serial_name().to_owned()),
                    tag: subtype.tag().to_owned(),
                    subtypes: vec![
                        Cow::Borrowed(slot.get().name()),
                        Cow::Borrowed(subtype.key().name()),
                    ],
                    context: None,
                });
            },
        }
    }
    Ok(())
}

// An inline discriminator is written into the subtype's object, so the subtype has to produce one.
fn check_kinds(hierarchy: &Hierarchy) -> Result<(), WeftError> {
    let Some(subtype) = hierarchy
        .subtypes()
        .iter()
        .find(|s| matches!(s.kind(), ConverterKind::Scalar | ConverterKind::Enum | ConverterKind::List))
    else {
        return Ok(());
    };
    Err(WeftError::InvalidConfiguration {
        message: format!(
            "Subtype '{}' of '{}' is a {:?} and cannot carry an inline class discriminator. \
             Use 'use_array_polymorphism = true'",
            subtype.tag(),
            hierarchy.serial_name(),
            subtype.kind()
        )
        .into(),
        context: None,
    })
}

fn check_fields(hierarchy: &Hierarchy, discriminator: &str) -> Result<(), WeftError> {
    let Some(subtype) = hierarchy.subtypes().iter().find(|s| s.elements().contains(&discriminator))
    else {
        return Ok(());
    };
    Err(WeftError::DiscriminatorConflict {
        hierarchy: Cow::Owned(hierarchy.serial_name().to_owned()),
        subtype: Cow::Borrowed(subtype.key().name()),
        key: discriminator.to_owned(),
        context: None,
    })
}
