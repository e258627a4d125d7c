//! The TOML configuration of the CLI: a mandate schema with an optional value,
//! the auction it is priced with, and the claim it is attached to.

use {
    alloy::{
        dyn_abi::DynSolType,
        primitives::{Address, FixedBytes, U256},
    },
    anyhow::{Context, Result, bail},
    mandate::{
        DomainSeparator,
        FieldDef,
        Lock,
        MandateType,
        Record,
        Value,
        schemas,
        typestring::MANDATE,
    },
    number::serialization::HexOrDecimalU256,
    price_curve::{Auction, FillComponent},
    serde::Deserialize,
    serde_with::serde_as,
    std::{collections::BTreeMap, path::Path},
};

#[derive(Debug)]
pub struct Config {
    pub mandate: MandateType,
    /// Value of the mandate, shaped like its fields.
    pub value: Option<Record>,
    /// Auction parameters without a fill block, the fill block is chosen per
    /// command.
    pub auction: Option<Auction>,
    pub components: Vec<FillComponent>,
    pub commitments: Vec<Lock>,
    pub claim: Option<Claim>,
}

/// The compact message the mandate is signed as a witness of.
#[derive(Debug, Clone)]
pub struct Claim {
    pub kind: ClaimKind,
    pub domain: DomainSeparator,
    pub arbiter: Address,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimKind {
    /// A single lock, the one commitment in the config.
    Compact,
    /// Every commitment in the config.
    BatchCompact,
}

/// Load the configuration from a TOML file.
pub fn load(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    parse(&data).with_context(|| format!("invalid configuration in {path:?}"))
}

pub fn parse(data: &str) -> Result<Config> {
    let file: File = toml::de::from_str(data).context("TOML syntax error")?;

    let mandate = match (file.mandate.schema, file.mandate.fields.is_empty()) {
        (Some(_), false) => bail!("mandate declares both a shipped schema and its own fields"),
        (Some(Schema::Simple), true) => schemas::simple()?,
        (Some(Schema::Tribunal), true) => schemas::tribunal()?,
        (None, _) => MandateType::new(file.mandate.fields, file.mandate.nested_types)?,
    };
    let value = file
        .mandate
        .value
        .map(|table| record(&mandate, mandate.fields(), &table))
        .transpose()
        .context("mandate value")?;

    let (auction, components) = match file.auction {
        Some(auction) => {
            let price_curve = auction
                .price_curve
                .iter()
                .map(|element| price_curve::pack(element.block_duration, element.scaling_factor))
                .collect::<Result<Vec<_>, _>>()
                .context("price curve")?;
            let components = auction
                .components
                .into_iter()
                .map(|component| FillComponent {
                    fill_token: component.fill_token,
                    minimum_fill_amount: component.minimum_fill_amount,
                    recipient: component.recipient,
                    apply_scaling: component.apply_scaling,
                })
                .collect();
            let auction = Auction {
                price_curve,
                supplemental_price_curve: auction.supplemental_price_curve,
                target_block: auction.target_block,
                fill_block: 0,
                scaling_factor: auction.scaling_factor,
                baseline_priority_fee: auction.baseline_priority_fee,
            };
            (Some(auction), components)
        }
        None => (None, Vec::new()),
    };

    let commitments = file
        .commitments
        .into_iter()
        .map(|commitment| Lock {
            lockTag: commitment.lock_tag,
            token: commitment.token,
            amount: commitment.amount,
        })
        .collect::<Vec<_>>();

    let claim = file.compact.map(|compact| Claim {
        kind: compact.kind,
        domain: DomainSeparator::new(compact.chain_id, compact.verifying_contract),
        arbiter: compact.arbiter,
        sponsor: compact.sponsor,
        nonce: compact.nonce,
        expires: compact.expires,
    });
    if let Some(claim) = &claim {
        if claim.kind == ClaimKind::Compact && commitments.len() != 1 {
            bail!(
                "a compact claims exactly one lock, {} commitments are configured",
                commitments.len()
            );
        }
    }

    Ok(Config {
        mandate,
        value,
        auction,
        components,
        commitments,
        claim,
    })
}

/// Converts a TOML table into a mandate value following the declared fields.
/// Missing members are left out and reported when the value is hashed.
fn record(mandate: &MandateType, fields: &[FieldDef], table: &toml::Table) -> Result<Record> {
    if let Some(unknown) = table
        .keys()
        .find(|key| !fields.iter().any(|field| &field.name == *key))
    {
        bail!("unknown field {unknown:?}");
    }

    let mut record = Record::new();
    for field in fields {
        let Some(member) = table.get(&field.name) else {
            continue;
        };
        let member = value(mandate, &field.ty, member)
            .with_context(|| format!("field {:?}", field.name))?;
        record.insert(field.name.clone(), member);
    }
    Ok(record)
}

fn value(mandate: &MandateType, ty: &str, value: &toml::Value) -> Result<Value> {
    if let Some(element_ty) = ty.strip_suffix("[]") {
        let toml::Value::Array(elements) = value else {
            bail!("expected an array of {element_ty}");
        };
        return elements
            .iter()
            .map(|element| self::value(mandate, element_ty, element))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array);
    }

    let nested = if ty == MANDATE {
        Some(mandate.fields())
    } else {
        mandate.nested_types().get(ty).map(Vec::as_slice)
    };
    if let Some(fields) = nested {
        let toml::Value::Table(table) = value else {
            bail!("expected a table for {ty}");
        };
        return record(mandate, fields, table).map(Value::Struct);
    }

    let scalar = match value {
        toml::Value::String(scalar) => scalar.clone(),
        toml::Value::Integer(scalar) => scalar.to_string(),
        toml::Value::Boolean(scalar) => scalar.to_string(),
        other => bail!("cannot use a {} as {ty}", other.type_str()),
    };
    let ty = DynSolType::parse(ty)?;
    Ok(Value::Primitive(ty.coerce_str(&scalar)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    mandate: MandateConfig,

    auction: Option<AuctionConfig>,

    /// The locks backing the claim.
    #[serde(default)]
    commitments: Vec<CommitmentConfig>,

    compact: Option<CompactConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct MandateConfig {
    /// Use a schema shipped with the SDK instead of declaring `fields`.
    schema: Option<Schema>,

    #[serde(default)]
    fields: Vec<FieldDef>,

    #[serde(default)]
    nested_types: BTreeMap<String, Vec<FieldDef>>,

    value: Option<toml::Table>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Schema {
    Simple,
    Tribunal,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct AuctionConfig {
    #[serde(default)]
    price_curve: Vec<CurveElementConfig>,

    /// Raw scaling factors, one per price curve element.
    #[serde_as(as = "Vec<HexOrDecimalU256>")]
    #[serde(default)]
    supplemental_price_curve: Vec<U256>,

    /// `0` for an auction without a price curve.
    #[serde(default)]
    target_block: u64,

    #[serde_as(as = "HexOrDecimalU256")]
    scaling_factor: U256,

    #[serde_as(as = "HexOrDecimalU256")]
    #[serde(default)]
    baseline_priority_fee: U256,

    #[serde(default)]
    components: Vec<ComponentConfig>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CurveElementConfig {
    block_duration: u64,

    #[serde_as(as = "HexOrDecimalU256")]
    scaling_factor: U256,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ComponentConfig {
    fill_token: Address,

    #[serde_as(as = "HexOrDecimalU256")]
    minimum_fill_amount: U256,

    recipient: Address,

    #[serde(default)]
    apply_scaling: bool,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CommitmentConfig {
    lock_tag: FixedBytes<12>,

    token: Address,

    #[serde_as(as = "HexOrDecimalU256")]
    amount: U256,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct CompactConfig {
    kind: ClaimKind,

    chain_id: u64,

    verifying_contract: Address,

    arbiter: Address,

    sponsor: Address,

    #[serde_as(as = "HexOrDecimalU256")]
    nonce: U256,

    #[serde_as(as = "HexOrDecimalU256")]
    expires: U256,
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    const TRIBUNAL: &str = r#"
        [mandate]
        schema = "tribunal"

        [mandate.value]
        adjuster = "0x1111111111111111111111111111111111111111"

        [[mandate.value.fills]]
        chainId = 10
        tribunal = "0x2222222222222222222222222222222222222222"
        expires = 1700000000
        baselinePriorityFee = "1000000000"
        scalingFactor = "1000000000000000000"
        priceCurve = ["88342353238919216479164875037145925791374194843780947907580310064630988800"]
        salt = "0x5555555555555555555555555555555555555555555555555555555555555555"

        [[mandate.value.fills.components]]
        fillToken = "0x3333333333333333333333333333333333333333"
        minimumFillAmount = "1000000"
        recipient = "0x4444444444444444444444444444444444444444"
        applyScaling = true

        [auction]
        target-block = 100
        scaling-factor = "1000000000000000000"
        price-curve = [{ block-duration = 50, scaling-factor = "1500000000000000000" }]
        supplemental-price-curve = ["1100000000000000000"]

        [[auction.components]]
        fill-token = "0x3333333333333333333333333333333333333333"
        minimum-fill-amount = 1000000
        recipient = "0x4444444444444444444444444444444444444444"
        apply-scaling = true

        [[commitments]]
        lock-tag = "0xabababababababababababab"
        token = "0x3333333333333333333333333333333333333333"
        amount = "5000000000000000000"
    "#;

    #[test]
    fn loads_tribunal_mandate() {
        let config = parse(TRIBUNAL).unwrap();
        assert_eq!(config.mandate.typehash(), schemas::tribunal().unwrap().typehash());

        let value = config.value.unwrap();
        let Some(Value::Array(fills)) = value.get("fills") else {
            panic!("fills should be an array");
        };
        assert_eq!(fills.len(), 1);
        let Value::Struct(fill) = &fills[0] else {
            panic!("fill should be a struct");
        };
        assert_eq!(fill.get("chainId"), Some(&Value::from(U256::from(10))));
        assert!(config.mandate.hash(&value).is_ok());

        let auction = config.auction.unwrap();
        assert_eq!(
            auction.price_curve,
            vec![price_curve::pack(50, U256::from(1_500_000_000_000_000_000u128)).unwrap()]
        );
        assert_eq!(auction.target_block, 100);
        assert_eq!(config.components.len(), 1);
        assert!(config.components[0].apply_scaling);
        assert_eq!(config.commitments[0].lockTag, FixedBytes::repeat_byte(0xab));
        assert!(config.claim.is_none());
    }

    #[test]
    fn custom_schema() {
        let config = parse(
            r#"
            [mandate]
            fields = [
                { name = "amount", type = "uint256" },
                { name = "legs", type = "Mandate_Leg[]" },
            ]

            [mandate.nested-types]
            Mandate_Leg = [
                { name = "token", type = "address" },
                { name = "weights", type = "uint16[]" },
            ]

            [mandate.value]
            amount = 42
            legs = [{ token = "0x3333333333333333333333333333333333333333", weights = [1, 2] }]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.mandate.typestring(),
            "Mandate(uint256 amount,Mandate_Leg[] legs)Mandate_Leg(address token,uint16[] weights)"
        );
        assert!(config.mandate.hash(&config.value.unwrap()).is_ok());
    }

    #[test]
    fn rejects_invalid_files() {
        // Schema errors surface while loading.
        let err = parse(
            r#"
            [mandate]
            fields = [{ name = "legs", type = "Leg[]" }]
            [mandate.nested-types]
            Leg = [{ name = "token", type = "address" }]
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Leg"));

        assert!(parse("[mandate]\nschema = \"simple\"\nunknown = 1\n").is_err());
        assert!(
            parse(
                "[mandate]\nschema = \"simple\"\nfields = [{ name = \"a\", type = \"uint256\" }]\n"
            )
            .is_err()
        );

        let err = parse("[mandate]\nschema = \"simple\"\n[mandate.value]\nsalt = true\n").unwrap_err();
        assert!(format!("{err:#}").contains("salt"));

        let err = parse("[mandate]\nschema = \"simple\"\n[mandate.value]\nsalty = 1\n").unwrap_err();
        assert!(format!("{err:#}").contains("salty"));
    }

    #[test]
    fn compact_needs_a_single_commitment() {
        let compact = r#"
            [compact]
            kind = "compact"
            chain-id = 1
            verifying-contract = "0x00000000000000171ede64904551eeDF3C6C9788"
            arbiter = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
            sponsor = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
            nonce = 7
            expires = 1700000000
        "#;
        let err = parse(&format!("[mandate]\nschema = \"simple\"\n{compact}")).unwrap_err();
        assert!(format!("{err:#}").contains("exactly one lock"));

        let config = parse(&format!("{TRIBUNAL}\n{compact}")).unwrap();
        let claim = config.claim.unwrap();
        assert_eq!(claim.kind, ClaimKind::Compact);
        assert_eq!(claim.nonce, U256::from(7));
    }

    #[test]
    fn example_config() {
        let config = load(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/example.toml"))).unwrap();
        assert!(config.mandate.hash(config.value.as_ref().unwrap()).is_ok());
        assert_eq!(config.claim.unwrap().kind, ClaimKind::Compact);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRIBUNAL.as_bytes()).unwrap();
        let config = load(file.path()).unwrap();
        assert_eq!(config.commitments.len(), 1);

        let err = load(Path::new("/nonexistent/tribunal.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("I/O error"));
    }
}
