use crate::member_import::member_record::available_value;
use derive_getters::Getters;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

/// Columns expected in the address table.
pub const ADDRESS_COLUMNS: [&str; 15] = [
    "ADDR CODE",
    "EMAIL-1",
    "EMAIL-2",
    "EMAIL-3",
    "EMAIL-4",
    "MOBILE",
    "MOBILE 1",
    "MOBILE 2",
    "MOBILE 3",
    "MOBILE 4",
    "BLDG NAME",
    "WING & FLAT NO",
    "DETAILED ADDRESS",
    "LOCATION",
    "PINCODE",
];

/// A row of the address table, shared by all members of a household.
#[derive(Debug, Deserialize, Getters, Default, PartialEq, Eq, Clone)]
pub struct AddressRecord {
    #[serde(alias = "ADDR CODE", default, deserialize_with = "available_value::deserialize")]
    address_code: Option<String>,
    #[serde(alias = "EMAIL-1", default, deserialize_with = "available_value::deserialize")]
    email_1: Option<String>,
    #[serde(alias = "EMAIL-2", default, deserialize_with = "available_value::deserialize")]
    email_2: Option<String>,
    #[serde(alias = "EMAIL-3", default, deserialize_with = "available_value::deserialize")]
    email_3: Option<String>,
    #[serde(alias = "EMAIL-4", default, deserialize_with = "available_value::deserialize")]
    email_4: Option<String>,
    #[serde(alias = "MOBILE", default, deserialize_with = "available_value::deserialize")]
    mobile: Option<String>,
    #[serde(alias = "MOBILE 1", default, deserialize_with = "available_value::deserialize")]
    mobile_1: Option<String>,
    #[serde(alias = "MOBILE 2", default, deserialize_with = "available_value::deserialize")]
    mobile_2: Option<String>,
    #[serde(alias = "MOBILE 3", default, deserialize_with = "available_value::deserialize")]
    mobile_3: Option<String>,
    #[serde(alias = "MOBILE 4", default, deserialize_with = "available_value::deserialize")]
    mobile_4: Option<String>,
    #[serde(alias = "BLDG NAME", default, deserialize_with = "available_value::deserialize")]
    building_name: Option<String>,
    #[serde(alias = "WING & FLAT NO", default, deserialize_with = "available_value::deserialize")]
    wing_and_flat_number: Option<String>,
    #[serde(alias = "DETAILED ADDRESS", default, deserialize_with = "available_value::deserialize")]
    detailed_address: Option<String>,
    #[serde(alias = "LOCATION", default, deserialize_with = "available_value::deserialize")]
    location: Option<String>,
    #[serde(alias = "PINCODE", default, deserialize_with = "available_value::deserialize")]
    pin_code: Option<String>,
}

impl AddressRecord {
    /// Email columns, in order of preference.
    pub fn email_candidates(&self) -> [Option<&str>; 4] {
        [
            self.email_1.as_deref(),
            self.email_2.as_deref(),
            self.email_3.as_deref(),
            self.email_4.as_deref(),
        ]
    }

    /// Mobile columns, in order of preference.
    pub fn mobile_candidates(&self) -> [Option<&str>; 5] {
        [
            self.mobile.as_deref(),
            self.mobile_1.as_deref(),
            self.mobile_2.as_deref(),
            self.mobile_3.as_deref(),
            self.mobile_4.as_deref(),
        ]
    }

    /// Parts of the postal address, from the most to the least specific.
    pub fn address_fragments(&self) -> [Option<&str>; 4] {
        [
            self.building_name.as_deref(),
            self.wing_and_flat_number.as_deref(),
            self.detailed_address.as_deref(),
            self.location.as_deref(),
        ]
    }
}

/// Address rows indexed by their code, built for a single import.
#[derive(Debug, Default)]
pub struct AddressIndex {
    addresses: HashMap<String, AddressRecord>,
}

impl AddressIndex {
    /// Index records by address code.
    /// Records without code are dropped; when a code is repeated, the last record wins.
    pub fn build(records: impl IntoIterator<Item = AddressRecord>) -> Self {
        let mut addresses = HashMap::new();
        for record in records {
            match record.address_code.clone() {
                Some(address_code) => {
                    if addresses.insert(address_code.clone(), record).is_some() {
                        debug!("Address code {address_code} is repeated, keeping the last one");
                    }
                }
                None => debug!("Dropping address without code [address: {record:?}]"),
            }
        }

        Self { addresses }
    }

    pub fn get(&self, address_code: Option<&str>) -> Option<&AddressRecord> {
        address_code.and_then(|address_code| self.addresses.get(address_code))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
