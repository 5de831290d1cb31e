use anyhow::bail;
use clap::Parser;
use user_provision::utils::{logger, validation::validate_name};
use user_provision::{
    AccountOutcome, AuditSink, BatchEngine, Cli, Directory, FileAudit, GroupOutcome,
    MemoryDirectory, NullAudit, ProvisionCommand, Reconciler, Settings, SystemDirectory,
};

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting user-provision");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli) {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let audit_path = cli
        .audit_log
        .clone()
        .unwrap_or_else(|| settings.audit.log_path.clone());
    let audit = FileAudit::new(audit_path);
    let mut directory = SystemDirectory::with_paths(
        settings.directory.passwd_file.clone(),
        settings.directory.group_file.clone(),
    );

    match cli.command {
        ProvisionCommand::Batch {
            file,
            dry_run,
            summary_json,
        } => {
            let summary = if dry_run {
                tracing::info!("🧪 Dry run: reconciling against an empty in-memory directory");
                let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
                engine.run_file(&file)?
            } else {
                let mut engine = BatchEngine::new(directory, audit);
                engine.run_file(&file)?
            };

            if summary_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "✅ Batch complete: {} accounts created, {} already existed, {} groups created, {} memberships added, {} failures",
                    summary.accounts_created,
                    summary.accounts_existing,
                    summary.groups_created,
                    summary.memberships_added,
                    summary.failures()
                );
            }
        }

        ProvisionCommand::CreateAccount { name } => {
            validate_name("account", &name)?;
            let mut reconciler = Reconciler::new(directory, audit);
            match reconciler.ensure_account(&name) {
                AccountOutcome::Created => println!("✅ Account '{}' created and locked", name),
                AccountOutcome::AlreadyExists => println!("Account '{}' already exists", name),
                AccountOutcome::CreateFailed { detail } => {
                    bail!("failed to create account '{}': {}", name, detail)
                }
            }
        }

        ProvisionCommand::DeleteAccount { name, remove_home } => {
            validate_name("account", &name)?;
            directory.delete_account(&name, remove_home)?;
            audit.record(&format!("Account '{}' deleted", name));
            println!("✅ Account '{}' deleted", name);
        }

        ProvisionCommand::LockAccount { name } => {
            validate_name("account", &name)?;
            directory.set_account_locked(&name, true)?;
            audit.record(&format!("Account '{}' locked", name));
            println!("✅ Account '{}' locked", name);
        }

        ProvisionCommand::UnlockAccount { name } => {
            validate_name("account", &name)?;
            directory.set_account_locked(&name, false)?;
            audit.record(&format!("Account '{}' unlocked", name));
            println!("✅ Account '{}' unlocked", name);
        }

        ProvisionCommand::CreateGroup { name } => {
            validate_name("group", &name)?;
            if directory.group_exists(&name) {
                println!("Group '{}' already exists", name);
            } else {
                directory.create_group(&name)?;
                audit.record(&format!("Group '{}' created", name));
                println!("✅ Group '{}' created", name);
            }
        }

        ProvisionCommand::DeleteGroup { name } => {
            validate_name("group", &name)?;
            directory.delete_group(&name)?;
            audit.record(&format!("Group '{}' deleted", name));
            println!("✅ Group '{}' deleted", name);
        }

        ProvisionCommand::AddToGroup { account, group } => {
            validate_name("account", &account)?;
            validate_name("group", &group)?;
            if !directory.account_exists(&account) {
                bail!("account '{}' does not exist", account);
            }
            let mut reconciler = Reconciler::new(directory, audit);
            for outcome in reconciler.ensure_membership(&account, &group) {
                match outcome {
                    GroupOutcome::GroupCreated { name } => println!("✅ Group '{}' created", name),
                    GroupOutcome::MembershipAdded { group } => {
                        println!("✅ Added '{}' to group '{}'", account, group)
                    }
                    GroupOutcome::GroupCreateFailed { name, detail } => {
                        bail!("failed to create group '{}': {}", name, detail)
                    }
                    GroupOutcome::MembershipAddFailed { group, detail } => {
                        bail!("failed to add '{}' to group '{}': {}", account, group, detail)
                    }
                }
            }
        }
    }

    Ok(())
}
