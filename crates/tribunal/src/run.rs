use {
    crate::{
        cli::{self, Command},
        config::{self, ClaimKind, Config},
    },
    anyhow::{Context, Result},
    clap::Parser,
    mandate::{BatchCompact, Compact, Witness, hashed_eip712_message},
    price_curve::{Auction, apply_supplemental, derive_amounts, evaluate},
    std::io::Write,
};

pub fn start(args: impl Iterator<Item = String>) -> Result<()> {
    let args = cli::Args::parse_from(args);
    let obs_config = observe::Config::new(&args.log, args.stderr_threshold, args.use_json_logs);
    observe::tracing::initialize(&obs_config);
    tracing::info!("running tribunal with {args:#?}");

    let config = config::load(&args.config)?;
    run(&args.command, &config, &mut std::io::stdout().lock())
}

/// Executes one command against a loaded configuration, writing the results
/// to `out`.
pub fn run(command: &Command, config: &Config, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Mandate => mandate(config, out),
        Command::Hash => hash(config, out),
        Command::Curve { blocks_passed } => {
            let auction = auction(config)?;
            let curve = apply_supplemental(&auction.price_curve, &auction.supplemental_price_curve)?;
            writeln!(out, "scaling factor: {}", evaluate(&curve, *blocks_passed)?)?;
            Ok(())
        }
        Command::Amounts {
            fill_block,
            priority_fee,
        } => {
            let auction = Auction {
                fill_block: *fill_block,
                ..auction(config)?.clone()
            };
            let derived = derive_amounts(
                &auction,
                &config.components,
                &config.commitments,
                *priority_fee,
            )?;
            writeln!(out, "exact in: {}", derived.exact_in)?;
            writeln!(out, "scaling multiplier: {}", derived.scaling_multiplier)?;
            for (i, amount) in derived.fill_amounts.iter().enumerate() {
                writeln!(out, "fill amount {i}: {amount}")?;
            }
            for (i, amount) in derived.claim_amounts.iter().enumerate() {
                writeln!(out, "claim amount {i}: {amount}")?;
            }
            Ok(())
        }
    }
}

fn mandate(config: &Config, out: &mut impl Write) -> Result<()> {
    let mandate = &config.mandate;
    writeln!(out, "typestring: {}", mandate.typestring())?;
    writeln!(out, "typehash: {}", mandate.typehash())?;
    for name in mandate.nested_types().keys() {
        if let (Some(typestring), Some(typehash)) =
            (mandate.nested_typestring(name), mandate.nested_typehash(name))
        {
            writeln!(out, "{name} typestring: {typestring}")?;
            writeln!(out, "{name} typehash: {typehash}")?;
        }
    }
    Ok(())
}

fn hash(config: &Config, out: &mut impl Write) -> Result<()> {
    let value = config
        .value
        .as_ref()
        .context("no mandate value configured")?;
    let witness = Witness::new(&config.mandate, value)?;
    writeln!(out, "mandate hash: {}", witness.hash())?;

    let Some(claim) = &config.claim else {
        return Ok(());
    };
    let claim_hash = match claim.kind {
        ClaimKind::Compact => {
            let lock = config
                .commitments
                .first()
                .context("no commitment configured")?;
            Compact {
                arbiter: claim.arbiter,
                sponsor: claim.sponsor,
                nonce: claim.nonce,
                expires: claim.expires,
                lock_tag: lock.lockTag,
                token: lock.token,
                amount: lock.amount,
            }
            .hash(Some(&witness))
        }
        ClaimKind::BatchCompact => BatchCompact {
            arbiter: claim.arbiter,
            sponsor: claim.sponsor,
            nonce: claim.nonce,
            expires: claim.expires,
            commitments: config.commitments.clone(),
        }
        .hash(Some(&witness)),
    };
    tracing::debug!(kind = ?claim.kind, %claim_hash, "hashed claim");
    writeln!(out, "claim hash: {claim_hash}")?;
    writeln!(
        out,
        "digest: {}",
        hashed_eip712_message(&claim.domain, &claim_hash)
    )?;
    Ok(())
}

fn auction(config: &Config) -> Result<&Auction> {
    config
        .auction
        .as_ref()
        .context("no [auction] section configured")
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::U256};

    const SIMPLE: &str = r#"
        [mandate]
        schema = "simple"

        [mandate.value]
        chainId = 1
        tribunal = "0x1111111111111111111111111111111111111111"
        recipient = "0x2222222222222222222222222222222222222222"
        expires = 1700000000
        token = "0x3333333333333333333333333333333333333333"
        minimumAmount = "1000000000000000000"
        baselinePriorityFee = "1000000000"
        scalingFactor = "1000000001000000000"
        salt = "0x5555555555555555555555555555555555555555555555555555555555555555"

        [auction]
        target-block = 100
        scaling-factor = "1000000000000000000"
        price-curve = [{ block-duration = 50, scaling-factor = "1500000000000000000" }]
        supplemental-price-curve = ["1100000000000000000"]

        [[auction.components]]
        fill-token = "0x3333333333333333333333333333333333333333"
        minimum-fill-amount = 1000000
        recipient = "0x2222222222222222222222222222222222222222"
        apply-scaling = true

        [[commitments]]
        lock-tag = "0xabababababababababababab"
        token = "0x3333333333333333333333333333333333333333"
        amount = "5000000000000000000"

        [compact]
        kind = "compact"
        chain-id = 1
        verifying-contract = "0x00000000000000171ede64904551eeDF3C6C9788"
        arbiter = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        sponsor = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
        nonce = 7
        expires = 1700000000
    "#;

    fn output(command: Command, config: &str) -> String {
        let config = config::parse(config).unwrap();
        let mut out = Vec::new();
        run(&command, &config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hashes_claim() {
        assert_eq!(
            output(Command::Hash, SIMPLE),
            "mandate hash: 0x502d3bb76bb081d750856e251c09f440f6490ae42be121b16252b8025710a80f\nclaim \
             hash: 0xbeb8de132a47d374da2a1d56d9be290657dc4b8f2382b3d7d122b593760dae5f\ndigest: \
             0x2d11ed9b2c9c602aaf6044bb3f2c497f4b8fb504c226cea9ab01e094edb123c4\n"
        );
    }

    #[test]
    fn hashes_batch_claim() {
        let batch = SIMPLE.replace(r#"kind = "compact""#, r#"kind = "batch-compact""#);
        let output = output(Command::Hash, &batch);
        assert!(output.contains(
            "claim hash: 0x4ac01c11f1a80610f2d08c92f46bdb5755a4a9450e6ff2c029961df6b880e778\n"
        ));
    }

    #[test]
    fn prints_mandate_types() {
        let output = output(Command::Mandate, SIMPLE);
        assert!(output.starts_with("typestring: Mandate(uint256 chainId,address tribunal,"));
        assert!(output.contains(
            "typehash: 0x52c75464356e20084ae43acac75087fbf0e0c678e7ffa326f369f37e88696036\n"
        ));
    }

    #[test]
    fn evaluates_curve() {
        // 1.5 + 1.1 - 1.0 decaying to neutral over 50 blocks.
        assert_eq!(
            output(Command::Curve { blocks_passed: 25 }, SIMPLE),
            "scaling factor: 1300000000000000000\n"
        );
    }

    #[test]
    fn derives_amounts() {
        assert_eq!(
            output(
                Command::Amounts {
                    fill_block: 125,
                    priority_fee: U256::from(2_000_000_000u64),
                },
                SIMPLE,
            ),
            "exact in: true\nscaling multiplier: 1300000000000000000\nfill amount 0: 1300000\nclaim \
             amount 0: 5000000000000000000\n"
        );
    }

    #[test]
    fn missing_sections() {
        let config = config::parse("[mandate]\nschema = \"simple\"\n").unwrap();
        let mut out = Vec::new();
        assert!(run(&Command::Hash, &config, &mut out).is_err());
        assert!(run(&Command::Curve { blocks_passed: 0 }, &config, &mut out).is_err());
    }
}
