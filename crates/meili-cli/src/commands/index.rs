//! Index and settings commands.
//!
//! Writes enqueue a task. Without `--wait` the task summary is printed; with
//! it the CLI polls the task and then prints the index or setting as the
//! server now reports it.

use anyhow::{Result, anyhow};
use meili_core::{MeiliClient, Setting, Settings, TaskFilter, TaskUid, parse_synonyms};
use serde_json::Value;

use crate::args::WaitArgs;
use crate::cli::{IndexCommands, IndexWaitArgs, SettingValuesArgs, UpdateSettingsArgs};
use crate::context::Context;
use crate::error::{CliError, index_error};

/// Run an `index` sub-command.
pub async fn execute(ctx: &mut Context, command: IndexCommands) -> Result<()> {
    let client = ctx.client()?;
    let client = &client;

    match command {
        IndexCommands::Create {
            index,
            primary_key,
            wait,
        } => create(ctx, client, &index, primary_key.as_deref(), &wait).await,
        IndexCommands::Delete(args) => delete(ctx, client, &args.index, &args.wait).await,
        IndexCommands::Get { index } => get(ctx, client, &index).await,
        IndexCommands::GetAll => {
            let indexes = ctx
                .output
                .spin("Fetching indexes", client.list_indexes())
                .await?;
            ctx.print("All Indexes", &indexes)
        },
        IndexCommands::GetPrimaryKey { index } => primary_key(ctx, client, &index).await,
        IndexCommands::GetStats { index } => {
            let stats = ctx
                .output
                .spin("Fetching stats", client.index_stats(&index))
                .await
                .map_err(|e| index_error(e, &index))?;
            ctx.print("Stats", &stats)
        },
        IndexCommands::GetSettings { index } => {
            let settings = ctx
                .output
                .spin("Fetching settings", client.get_settings(&index))
                .await
                .map_err(|e| index_error(e, &index))?;
            ctx.print("Settings", &settings)
        },
        IndexCommands::GetUpdateStatus { index, update_id } => {
            update_status(ctx, client, &index, update_id).await
        },
        IndexCommands::GetAllUpdateStatus { index } => {
            let filter = TaskFilter {
                index_uid: Some(index.clone()),
                ..TaskFilter::default()
            };
            let tasks = ctx
                .output
                .spin("Fetching updates", client.get_tasks(&filter))
                .await
                .map_err(|e| index_error(e, &index))?;
            ctx.print("All Update Status", &tasks)
        },
        IndexCommands::Update {
            index,
            primary_key,
            wait,
        } => update(ctx, client, &index, &primary_key, &wait).await,
        IndexCommands::UpdateSettings(args) => update_settings(ctx, client, args).await,
        IndexCommands::UpdateDisplayedAttributes(args) => {
            update_list(ctx, client, Setting::DisplayedAttributes, args).await
        },
        IndexCommands::UpdateDistinctAttribute(args) => {
            let value = Value::String(args.attribute);
            update_setting(
                ctx,
                client,
                &args.index,
                Setting::DistinctAttribute,
                &value,
                &args.wait,
            )
            .await
        },
        IndexCommands::UpdateFilterableAttributes(args) => {
            update_list(ctx, client, Setting::FilterableAttributes, args).await
        },
        IndexCommands::UpdateRankingRules(args) => {
            update_list(ctx, client, Setting::RankingRules, args).await
        },
        IndexCommands::UpdateSearchableAttributes(args) => {
            update_list(ctx, client, Setting::SearchableAttributes, args).await
        },
        IndexCommands::UpdateSortableAttributes(args) => {
            update_list(ctx, client, Setting::SortableAttributes, args).await
        },
        IndexCommands::UpdateStopWords(args) => {
            update_list(ctx, client, Setting::StopWords, args).await
        },
        IndexCommands::UpdateSynonyms(args) => {
            let value = serde_json::to_value(parse_synonyms(&args.synonyms)?)?;
            update_setting(
                ctx,
                client,
                &args.index,
                Setting::Synonyms,
                &value,
                &args.wait,
            )
            .await
        },
        IndexCommands::ResetSettings(args) => reset_settings(ctx, client, &args).await,
        IndexCommands::ResetDisplayedAttributes(args) => {
            reset_setting(ctx, client, Setting::DisplayedAttributes, &args).await
        },
        IndexCommands::ResetDistinctAttribute(args) => {
            reset_setting(ctx, client, Setting::DistinctAttribute, &args).await
        },
        IndexCommands::ResetFilterableAttributes(args) => {
            reset_setting(ctx, client, Setting::FilterableAttributes, &args).await
        },
        IndexCommands::ResetRankingRules(args) => {
            reset_setting(ctx, client, Setting::RankingRules, &args).await
        },
        IndexCommands::ResetSearchableAttributes(args) => {
            reset_setting(ctx, client, Setting::SearchableAttributes, &args).await
        },
        IndexCommands::ResetSortableAttributes(args) => {
            reset_setting(ctx, client, Setting::SortableAttributes, &args).await
        },
        IndexCommands::ResetStopWords(args) => {
            reset_setting(ctx, client, Setting::StopWords, &args).await
        },
        IndexCommands::ResetSynonyms(args) => {
            reset_setting(ctx, client, Setting::Synonyms, &args).await
        },
    }
}

async fn get(ctx: &mut Context, client: &MeiliClient, index: &str) -> Result<()> {
    let found = ctx
        .output
        .spin("Fetching index", client.get_index(index))
        .await
        .map_err(|e| index_error(e, index))?;
    ctx.print("Index", &found)
}

async fn create(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    primary_key: Option<&str>,
    wait: &WaitArgs,
) -> Result<()> {
    let task = ctx
        .output
        .spin("Creating index", client.create_index(index, primary_key))
        .await
        .map_err(|e| index_error(e, index))?;
    if ctx.settle(client, &task, wait, "Index").await?.is_some() {
        get(ctx, client, index).await?;
    }
    Ok(())
}

async fn delete(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    wait: &WaitArgs,
) -> Result<()> {
    let task = ctx
        .output
        .spin("Deleting index", client.delete_index(index))
        .await
        .map_err(|e| index_error(e, index))?;
    if ctx.settle(client, &task, wait, "Delete Index").await?.is_some() {
        ctx.output
            .message("Delete Index", &format!("Index {index} successfully deleted"))?;
    }
    Ok(())
}

async fn update(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    primary_key: &str,
    wait: &WaitArgs,
) -> Result<()> {
    let task = ctx
        .output
        .spin("Updating index", client.update_index(index, primary_key))
        .await
        .map_err(|e| index_error(e, index))?;
    if ctx.settle(client, &task, wait, "Index").await?.is_some() {
        get(ctx, client, index).await?;
    }
    Ok(())
}

async fn primary_key(ctx: &mut Context, client: &MeiliClient, index: &str) -> Result<()> {
    let found = ctx
        .output
        .spin("Fetching index", client.get_index(index))
        .await
        .map_err(|e| index_error(e, index))?;
    let primary_key = found.get("primaryKey").cloned().unwrap_or(Value::Null);
    ctx.print("Primary Key", &primary_key)
}

async fn update_status(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    update_id: TaskUid,
) -> Result<()> {
    let task = ctx
        .output
        .spin("Fetching update", client.get_task(update_id))
        .await?;
    if task.index_uid.as_deref().is_some_and(|uid| uid != index) {
        return Err(CliError::not_found(anyhow!(
            "Update {update_id} does not belong to index {index}"
        ))
        .into());
    }
    ctx.print("Update Status", &task.raw)
}

async fn update_settings(
    ctx: &mut Context,
    client: &MeiliClient,
    args: UpdateSettingsArgs,
) -> Result<()> {
    let settings = Settings {
        ranking_rules: args.ranking_rules,
        stop_words: args.stop_words,
        synonyms: args.synonyms.as_deref().map(parse_synonyms).transpose()?,
        searchable_attributes: args.searchable_attributes,
        displayed_attributes: args.displayed_attributes,
        filterable_attributes: args.filterable_attributes,
        sortable_attributes: args.sortable_attributes,
        distinct_attribute: args.distinct_attribute,
    };
    if settings.is_empty() {
        return Err(CliError::usage(anyhow!(
            "No settings to update. Pass at least one setting flag, e.g. --stop-words"
        ))
        .into());
    }

    let index = args.index.as_str();
    let task = ctx
        .output
        .spin("Updating settings", client.update_settings(index, &settings))
        .await
        .map_err(|e| index_error(e, index))?;
    if ctx
        .settle(client, &task, &args.wait, "Update Settings")
        .await?
        .is_some()
    {
        print_settings(ctx, client, index).await?;
    }
    Ok(())
}

async fn reset_settings(
    ctx: &mut Context,
    client: &MeiliClient,
    args: &IndexWaitArgs,
) -> Result<()> {
    let index = args.index.as_str();
    let task = ctx
        .output
        .spin("Resetting settings", client.reset_settings(index))
        .await
        .map_err(|e| index_error(e, index))?;
    if ctx
        .settle(client, &task, &args.wait, "Reset Settings")
        .await?
        .is_some()
    {
        print_settings(ctx, client, index).await?;
    }
    Ok(())
}

async fn print_settings(ctx: &mut Context, client: &MeiliClient, index: &str) -> Result<()> {
    let settings = ctx
        .output
        .spin("Fetching settings", client.get_settings(index))
        .await
        .map_err(|e| index_error(e, index))?;
    ctx.print("Settings", &settings)
}

async fn update_list(
    ctx: &mut Context,
    client: &MeiliClient,
    setting: Setting,
    args: SettingValuesArgs,
) -> Result<()> {
    let value = Value::from(args.values);
    update_setting(ctx, client, &args.index, setting, &value, &args.wait).await
}

async fn update_setting(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    setting: Setting,
    value: &Value,
    wait: &WaitArgs,
) -> Result<()> {
    let task = ctx
        .output
        .spin("Updating setting", client.update_setting(index, setting, value))
        .await
        .map_err(|e| index_error(e, index))?;
    let title = format!("Update {}", setting.title());
    if ctx.settle(client, &task, wait, &title).await?.is_some() {
        print_setting(ctx, client, index, setting).await?;
    }
    Ok(())
}

async fn reset_setting(
    ctx: &mut Context,
    client: &MeiliClient,
    setting: Setting,
    args: &IndexWaitArgs,
) -> Result<()> {
    let index = args.index.as_str();
    let task = ctx
        .output
        .spin("Resetting setting", client.reset_setting(index, setting))
        .await
        .map_err(|e| index_error(e, index))?;
    let title = format!("Reset {}", setting.title());
    if ctx.settle(client, &task, &args.wait, &title).await?.is_some() {
        print_setting(ctx, client, index, setting).await?;
    }
    Ok(())
}

async fn print_setting(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    setting: Setting,
) -> Result<()> {
    let value = ctx
        .output
        .spin("Fetching setting", client.get_setting(index, setting))
        .await
        .map_err(|e| index_error(e, index))?;
    ctx.print(setting.title(), &value)
}
