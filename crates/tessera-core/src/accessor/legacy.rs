//! Legacy accessors that read data through a subject's hidden handle.

use std::marker::PhantomData;

use crate::error::{AccessError, AccessResult};
use crate::foundation::{FieldSlot, FieldValue, Subject};

/// Conversion from a raw [`FieldValue`] into the value an operation returns.
pub trait FromField: Sized {
    /// Human-readable kind, used in mismatch errors.
    const KIND: &'static str;

    fn from_field(value: FieldValue) -> Option<Self>;
}

impl FromField for i32 {
    const KIND: &'static str = "int";

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }
}

impl FromField for String {
    const KIND: &'static str = "text";

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// A legacy strategy for one operation, bound to a subject type.
///
/// Implementations hold whatever was resolved at bind time and are invoked
/// per subject instance.
pub trait LegacyAccessor<T>: Send + Sync {
    fn read(&self, subject: &dyn Subject) -> AccessResult<T>;
}

/// Boxed accessor as stored in a binding.
pub type BoxedAccessor<T> = Box<dyn LegacyAccessor<T>>;

/// Reads one named field of the hidden handle.
#[derive(Debug)]
pub struct FieldAccessor<T> {
    field: &'static str,
    slot: FieldSlot,
    type_name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FromField + 'static> FieldAccessor<T> {
    /// Resolves `field` on the handle type of `subject`.
    ///
    /// This performs the type-level lookup and should run once per process.
    pub fn bind(subject: &dyn Subject, field: &'static str) -> AccessResult<Self> {
        let shape = subject.handle()?.shape()?;
        let slot = shape.require(field)?;
        Ok(Self {
            field,
            slot,
            type_name: shape.type_name().to_string(),
            _marker: PhantomData,
        })
    }

    /// Factory form of [`bind`](Self::bind) for a binding cell.
    pub fn boxed(subject: &dyn Subject, field: &'static str) -> AccessResult<BoxedAccessor<T>> {
        Self::bind(subject, field).map(|accessor| Box::new(accessor) as BoxedAccessor<T>)
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl<T: FromField + 'static> LegacyAccessor<T> for FieldAccessor<T> {
    fn read(&self, subject: &dyn Subject) -> AccessResult<T> {
        let handle = subject.handle()?;
        if handle.type_name() != self.type_name {
            return Err(AccessError::ForeignHandle {
                bound: self.type_name.clone(),
                found: handle.type_name().to_string(),
            });
        }
        let value = handle.read(self.slot)?;
        let found = value.kind();
        T::from_field(value).ok_or(AccessError::TypeMismatch {
            field: self.field,
            expected: T::KIND,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{FieldHandle, SubjectSnapshot};

    fn subject(ping: FieldValue) -> SubjectSnapshot {
        SubjectSnapshot::new("Alice")
            .with_handle(FieldHandle::new("EntityPlayer").field("ping", ping))
    }

    #[test]
    fn test_bind_and_read() {
        let alice = subject(FieldValue::Int(35));
        let accessor = FieldAccessor::<i32>::bind(&alice, "ping").unwrap();
        assert_eq!(accessor.type_name(), "EntityPlayer");
        assert_eq!(accessor.read(&alice).unwrap(), 35);
    }

    #[test]
    fn test_bind_missing_field() {
        let alice = subject(FieldValue::Int(35));
        let err = FieldAccessor::<String>::bind(&alice, "locale").unwrap_err();
        assert_eq!(err, AccessError::missing_field("EntityPlayer", "locale"));
    }

    #[test]
    fn test_read_rejects_other_handle_types() {
        let alice = subject(FieldValue::Int(40));
        let npc = SubjectSnapshot::new("Guard").with_handle(
            FieldHandle::new("FakePlayerHandle")
                .field("food", FieldValue::Int(20))
                .field("ping", FieldValue::Int(77)),
        );
        let accessor = FieldAccessor::<i32>::bind(&alice, "ping").unwrap();

        assert_eq!(accessor.read(&alice).unwrap(), 40);
        assert_eq!(
            accessor.read(&npc),
            Err(AccessError::ForeignHandle {
                bound: "EntityPlayer".into(),
                found: "FakePlayerHandle".into(),
            })
        );
        assert_eq!(accessor.read(&alice).unwrap(), 40);
    }

    #[test]
    fn test_read_type_mismatch() {
        let alice = subject(FieldValue::Text("fast".into()));
        let accessor = FieldAccessor::<i32>::bind(&alice, "ping").unwrap();
        assert!(matches!(
            accessor.read(&alice),
            Err(AccessError::TypeMismatch { expected: "int", found: "text", .. })
        ));
    }
}
