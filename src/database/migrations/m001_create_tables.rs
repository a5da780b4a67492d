use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Categories::Slug).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Projects::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Projects::Slug).string().not_null().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_category_id")
                            .from(Projects::Table, Projects::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create actions table
        manager
            .create_table(
                Table::create()
                    .table(Actions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Actions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Actions::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Actions::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Actions::Priority).string_len(1).not_null().default("⇅"))
                    .col(ColumnDef::new(Actions::Status).string_len(1).not_null().default("A"))
                    .col(ColumnDef::new(Actions::Deadline).date())
                    .col(ColumnDef::new(Actions::Label).string().not_null())
                    .col(ColumnDef::new(Actions::Name).string().not_null())
                    .col(ColumnDef::new(Actions::Description).text().not_null())
                    .col(ColumnDef::new(Actions::PlannedOn).timestamp())
                    .col(ColumnDef::new(Actions::Estimate).integer())
                    .col(ColumnDef::new(Actions::EstimateUnit).string_len(1))
                    .col(ColumnDef::new(Actions::Duration).integer())
                    .col(ColumnDef::new(Actions::DurationUnit).string_len(1))
                    .col(ColumnDef::new(Actions::Slug).string().not_null().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actions_project_id")
                            .from(Actions::Table, Actions::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create events table (1:1 payload for kind = event)
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::ActionId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Location).string())
                    .col(ColumnDef::new(Events::DepartureTime).time())
                    .col(
                        ColumnDef::new(Events::SendReminder)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_action_id")
                            .from(Events::Table, Events::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create recurrences table (1:1 payload for kind = recurrent)
        manager
            .create_table(
                Table::create()
                    .table(Recurrences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recurrences::ActionId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recurrences::Frequency).string_len(1).not_null())
                    .col(ColumnDef::new(Recurrences::Active).boolean().not_null())
                    .col(ColumnDef::new(Recurrences::Until).timestamp())
                    .col(ColumnDef::new(Recurrences::Count).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recurrences_action_id")
                            .from(Recurrences::Table, Recurrences::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create action_dependencies table (directed edges)
        manager
            .create_table(
                Table::create()
                    .table(ActionDependencies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ActionDependencies::ActionId).integer().not_null())
                    .col(ColumnDef::new(ActionDependencies::DependsOnId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ActionDependencies::ActionId)
                            .col(ActionDependencies::DependsOnId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_dependencies_action_id")
                            .from(ActionDependencies::Table, ActionDependencies::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_dependencies_depends_on_id")
                            .from(ActionDependencies::Table, ActionDependencies::DependsOnId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create notes table
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::ActionId).integer().not_null())
                    .col(ColumnDef::new(Notes::Number).integer().not_null())
                    .col(ColumnDef::new(Notes::Content).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_action_id")
                            .from(Notes::Table, Notes::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create steps table
        manager
            .create_table(
                Table::create()
                    .table(Steps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Steps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Steps::ActionId).integer().not_null())
                    .col(ColumnDef::new(Steps::Number).integer().not_null())
                    .col(ColumnDef::new(Steps::PlannedOn).timestamp())
                    .col(ColumnDef::new(Steps::Content).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_steps_action_id")
                            .from(Steps::Table, Steps::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create logs table
        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Logs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Logs::ActionId).integer().not_null())
                    .col(ColumnDef::new(Logs::Number).integer().not_null())
                    .col(ColumnDef::new(Logs::Date).timestamp())
                    .col(ColumnDef::new(Logs::Content).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_action_id")
                            .from(Logs::Table, Logs::ActionId)
                            .to(Actions::Table, Actions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes matching the list-view access paths
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_category_name")
                    .table(Projects::Table)
                    .col(Projects::CategoryId)
                    .col(Projects::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actions_project_label")
                    .table(Actions::Table)
                    .col(Actions::ProjectId)
                    .col(Actions::Label)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actions_project_name")
                    .table(Actions::Table)
                    .col(Actions::ProjectId)
                    .col(Actions::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actions_planned_deadline_name")
                    .table(Actions::Table)
                    .col(Actions::PlannedOn)
                    .col(Actions::Deadline)
                    .col(Actions::Name)
                    .to_owned(),
            )
            .await?;

        // Sequence numbers are unique per action and per child type
        manager
            .create_index(
                Index::create()
                    .name("idx_notes_action_number")
                    .table(Notes::Table)
                    .col(Notes::ActionId)
                    .col(Notes::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_steps_action_number")
                    .table(Steps::Table)
                    .col(Steps::ActionId)
                    .col(Steps::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_logs_action_number")
                    .table(Logs::Table)
                    .col(Logs::ActionId)
                    .col(Logs::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Steps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActionDependencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recurrences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    CategoryId,
    Name,
    Slug,
}

#[derive(Iden)]
enum Actions {
    Table,
    Id,
    ProjectId,
    Kind,
    Priority,
    Status,
    Deadline,
    Label,
    Name,
    Description,
    PlannedOn,
    Estimate,
    EstimateUnit,
    Duration,
    DurationUnit,
    Slug,
}

#[derive(Iden)]
enum Events {
    Table,
    ActionId,
    Location,
    DepartureTime,
    SendReminder,
}

#[derive(Iden)]
enum Recurrences {
    Table,
    ActionId,
    Frequency,
    Active,
    Until,
    Count,
}

#[derive(Iden)]
enum ActionDependencies {
    Table,
    ActionId,
    DependsOnId,
}

#[derive(Iden)]
enum Notes {
    Table,
    Id,
    ActionId,
    Number,
    Content,
}

#[derive(Iden)]
enum Steps {
    Table,
    Id,
    ActionId,
    Number,
    PlannedOn,
    Content,
}

#[derive(Iden)]
enum Logs {
    Table,
    Id,
    ActionId,
    Number,
    Date,
    Content,
}
