//! `serde` support.
//!
//! A generator serializes as a sequence by running one drive. A [`Group`]
//! serializes as a `{ "key": ..., "members": [...] }` structure.

use serde::ser::{Error as _, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use super::{Generator, Group};

impl<T, S> Serialize for Generator<T, S>
where
    T: Serialize + 'static,
    S: Default + 'static,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut sequence = serializer.serialize_seq(None)?;
        let mut failure = None;
        let driven = self.for_each(|value, _, stop| {
            if let Err(error) = sequence.serialize_element(&value) {
                failure = Some(error);
                return stop.halt();
            }
            Ok(S::default())
        });

        if let Some(error) = failure {
            return Err(error);
        }
        driven.map_err(Ser::Error::custom)?;
        sequence.end()
    }
}

impl<K, T> Serialize for Group<K, T>
where
    K: Serialize,
    T: Serialize + 'static,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut group = serializer.serialize_struct("Group", 2)?;
        group.serialize_field("key", self.key())?;
        group.serialize_field("members", self.members())?;
        group.end()
    }
}
