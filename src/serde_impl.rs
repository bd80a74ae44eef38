use crate::{component::UriComponents, normalize::Flags};
use alloc::string::String;
use core::fmt;
use serde::{
    de::{self, SeqAccess, Visitor},
    ser, Deserialize, Deserializer, Serialize, Serializer,
};

impl Serialize for UriComponents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = self.build().map_err(ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for UriComponents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UriComponents::parse(&s).map_err(|e| {
            de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}

impl Serialize for Flags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter_names().map(|(name, _)| name))
    }
}

impl<'de> Deserialize<'de> for Flags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = Flags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of normalization flag names")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Flags, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut flags = Flags::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    match Flags::from_name(&name) {
                        Some(flag) => flags |= flag,
                        None => {
                            return Err(de::Error::custom(format_args!(
                                "unknown normalization flag {name:?}"
                            )))
                        }
                    }
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_seq(FlagsVisitor)
    }
}
