//! Default C# renderer.
//!
//! Emits an ASP.NET Core solution using EF Core, AutoMapper, FluentValidation,
//! Sieve and AutoBogus. Every anchored file carries each of its markers
//! exactly once.

use std::fmt::Write as _;

use joinery_core::{
    application::{ApplicationError, ports::ArtifactRenderer},
    domain::{
        Anchor, ArtifactKind, ClassPath, Endpoint, Entity, Fragment, Project, RenderModel,
        SolutionSettings, Subject, entities::common::lowercase_first,
    },
    error::{JoineryError, JoineryResult},
};
use serde_json::json;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::fragments::{self, property_block};

const INDENT: &str = "    ";

/// Visual Studio project type id for SDK-style C# projects.
const CSHARP_PROJECT_TYPE: &str = "9A19103F-16F7-4668-BE54-9A1E7A4F7556";

/// Renders every artifact kind as C#.
///
/// Pure: the same kind, location and model always yield the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpRenderer;

impl CSharpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactRenderer for CSharpRenderer {
    #[instrument(skip_all, fields(kind = %kind, file = %location))]
    fn render(
        &self,
        kind: ArtifactKind,
        location: &ClassPath,
        model: &RenderModel,
    ) -> JoineryResult<String> {
        let settings = &model.solution;
        let text = match kind {
            ArtifactKind::SolutionFile => solution_file(settings),
            ArtifactKind::Entity => entity_class(location, require_entity(kind, model)?)?,
            ArtifactKind::DtoRead | ArtifactKind::DtoCreate | ArtifactKind::DtoUpdate => {
                dto_class(kind, location, require_entity(kind, model)?)?
            }
            ArtifactKind::DtoReadParameters => parameters_dto(location),
            ArtifactKind::Validator => validator(location, settings, require_entity(kind, model)?),
            ArtifactKind::Profile => profile(location, settings, require_entity(kind, model)?),
            ArtifactKind::Controller => {
                controller(location, settings, require_entity(kind, model)?)
            }
            ArtifactKind::Fake => fake(location, settings, require_entity(kind, model)?),
            ArtifactKind::ServiceRegistration => service_registration(location, settings),
            ArtifactKind::Seeder => db_seeder(location, settings),
            ArtifactKind::DbContext => db_context(location, settings),
            ArtifactKind::TestFixture => test_fixture(location, settings),
            ArtifactKind::TestBase => test_base(location, settings),
            ArtifactKind::ApiRoutes => match &model.subject {
                Subject::Entities(entities) => api_routes(location, entities),
                _ => return Err(missing(kind, "the entity list")),
            },
            ArtifactKind::HealthCheckTest => health_check_test(location, settings),
            ArtifactKind::SwaggerRegistration => swagger_registration(location, settings),
            ArtifactKind::BusRegistration => bus_registration(location),
            ArtifactKind::Producer => match &model.subject {
                Subject::Producer(p) => producer(
                    location,
                    p.exchange_name.as_deref().unwrap_or(&p.producer_name),
                ),
                _ => return Err(missing(kind, "a producer")),
            },
            ArtifactKind::Consumer => match &model.subject {
                Subject::Consumer(c) => consumer(
                    location,
                    c.queue_name.as_deref().unwrap_or(&c.consumer_name),
                ),
                _ => return Err(missing(kind, "a consumer")),
            },
            ArtifactKind::AppSettings => match &model.subject {
                Subject::Environment(env) => {
                    app_settings(settings, env.connection_string.as_deref())?
                }
                _ => return Err(missing(kind, "an environment")),
            },
        };

        debug!(bytes = text.len(), "Rendered artifact");
        Ok(text)
    }

    #[instrument(skip_all, fields(fragment = %fragment))]
    fn render_fragment(&self, fragment: Fragment, model: &RenderModel) -> JoineryResult<String> {
        fragments::render(fragment, model)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn require_entity(kind: ArtifactKind, model: &RenderModel) -> JoineryResult<&Entity> {
    model.entity().ok_or_else(|| missing(kind, "an entity"))
}

fn missing(kind: ArtifactKind, what: &str) -> JoineryError {
    ApplicationError::RenderingFailed {
        what: kind.to_string(),
        reason: format!("model does not carry {what}"),
    }
    .into()
}

/// Namespace of `kind` for `subject`, for `using` directives.
fn namespace_of(kind: ArtifactKind, subject: &str, settings: &SolutionSettings) -> String {
    ClassPath::resolve(kind, subject, &settings.solution_name)
        .namespace()
        .to_string()
}

fn indent(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn marker(anchor: Anchor, levels: usize) -> String {
    format!("{}{}", INDENT.repeat(levels), anchor.marker())
}

/// Class body listing `entity`'s properties as they appear in `kind`,
/// closed by the `Properties` anchor.
fn property_section(kind: ArtifactKind, entity: &Entity) -> JoineryResult<String> {
    let mut body = String::new();
    for property in &entity.properties {
        if kind != ArtifactKind::Entity && kind != ArtifactKind::DtoRead && property.is_primary_key
        {
            continue;
        }
        let block = property_block(kind, property)?;
        if block.is_empty() {
            continue;
        }
        body.push_str(&indent(&block, 1));
        body.push_str("\n\n");
    }
    body.push_str(&marker(Anchor::Properties, 1));
    body.push('\n');
    Ok(body)
}

// ── Solution ─────────────────────────────────────────────────────────────────

fn project_guid(name: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
        .hyphenated()
        .to_string()
        .to_uppercase()
}

fn solution_file(settings: &SolutionSettings) -> String {
    let base = &settings.solution_name;
    let projects = [
        (Project::Core, "src"),
        (Project::Infrastructure, "src"),
        (Project::WebApi, "src"),
        (Project::Tests, "tests"),
    ];

    let mut out = String::from(
        "\u{feff}\nMicrosoft Visual Studio Solution File, Format Version 12.00\n\
         # Visual Studio Version 17\n\
         VisualStudioVersion = 17.0.31903.59\n\
         MinimumVisualStudioVersion = 10.0.40219.1\n",
    );
    for (project, area) in projects {
        let name = project.directory_name(base);
        let _ = writeln!(
            out,
            "Project(\"{{{CSHARP_PROJECT_TYPE}}}\") = \"{name}\", \"{area}\\{name}\\{name}.csproj\", \"{{{}}}\"\nEndProject",
            project_guid(&name)
        );
    }
    out.push_str(
        "Global\n\
         \tGlobalSection(SolutionConfigurationPlatforms) = preSolution\n\
         \t\tDebug|Any CPU = Debug|Any CPU\n\
         \t\tRelease|Any CPU = Release|Any CPU\n\
         \tEndGlobalSection\n\
         \tGlobalSection(ProjectConfigurationPlatforms) = postSolution\n",
    );
    for (project, _) in projects {
        let guid = project_guid(&project.directory_name(base));
        for config in ["Debug", "Release"] {
            let _ = writeln!(
                out,
                "\t\t{{{guid}}}.{config}|Any CPU.ActiveCfg = {config}|Any CPU\n\
                 \t\t{{{guid}}}.{config}|Any CPU.Build.0 = {config}|Any CPU"
            );
        }
    }
    out.push_str("\tEndGlobalSection\nEndGlobal\n");
    out
}

// ── Core project ─────────────────────────────────────────────────────────────

fn entity_class(location: &ClassPath, entity: &Entity) -> JoineryResult<String> {
    Ok(format!(
        "namespace {ns};\n\
         \n\
         using System;\n\
         using System.ComponentModel.DataAnnotations;\n\
         using System.ComponentModel.DataAnnotations.Schema;\n\
         using Sieve.Attributes;\n\
         \n\
         [Table(\"{name}\")]\n\
         public class {class}\n\
         {{\n\
         {body}}}\n",
        ns = location.namespace(),
        name = entity.name,
        class = location.class_name(),
        body = property_section(ArtifactKind::Entity, entity)?,
    ))
}

fn dto_class(kind: ArtifactKind, location: &ClassPath, entity: &Entity) -> JoineryResult<String> {
    Ok(format!(
        "namespace {ns};\n\
         \n\
         using System;\n\
         \n\
         public class {class}\n\
         {{\n\
         {body}}}\n",
        ns = location.namespace(),
        class = location.class_name(),
        body = property_section(kind, entity)?,
    ))
}

fn parameters_dto(location: &ClassPath) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         public class {class}\n\
         {{\n\
         {i}const int MaxPageSize = 500;\n\
         \n\
         {i}private int _pageSize = 20;\n\
         \n\
         {i}public int PageNumber {{ get; set; }} = 1;\n\
         \n\
         {i}public int PageSize\n\
         {i}{{\n\
         {i}{i}get => _pageSize;\n\
         {i}{i}set => _pageSize = value > MaxPageSize ? MaxPageSize : value;\n\
         {i}}}\n\
         \n\
         {i}public string? Filters {{ get; set; }}\n\
         \n\
         {i}public string? SortOrder {{ get; set; }}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        i = INDENT,
    )
}

fn validator(location: &ClassPath, settings: &SolutionSettings, entity: &Entity) -> String {
    let dto_ns = namespace_of(ArtifactKind::DtoCreate, &entity.name, settings);
    let name = &entity.name;
    let class = location.class_name();
    format!(
        "namespace {ns};\n\
         \n\
         using FluentValidation;\n\
         using {dto_ns};\n\
         \n\
         public class {class} : AbstractValidator<{name}ForCreationDto>\n\
         {{\n\
         {i}public {class}()\n\
         {i}{{\n\
         {i}{i}// RuleFor(dto => dto.Property).NotEmpty();\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        i = INDENT,
    )
}

fn profile(location: &ClassPath, settings: &SolutionSettings, entity: &Entity) -> String {
    let entity_ns = namespace_of(ArtifactKind::Entity, &entity.name, settings);
    let dto_ns = namespace_of(ArtifactKind::DtoRead, &entity.name, settings);
    let name = &entity.name;
    let class = location.class_name();
    format!(
        "namespace {ns};\n\
         \n\
         using AutoMapper;\n\
         using {entity_ns};\n\
         using {dto_ns};\n\
         \n\
         public class {class} : Profile\n\
         {{\n\
         {i}public {class}()\n\
         {i}{{\n\
         {i}{i}CreateMap<{name}, {name}Dto>().ReverseMap();\n\
         {i}{i}CreateMap<{name}ForCreationDto, {name}>();\n\
         {i}{i}CreateMap<{name}ForUpdateDto, {name}>().ReverseMap();\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        i = INDENT,
    )
}

// ── Web API project ──────────────────────────────────────────────────────────

/// `[Authorize]` lines for the policies guarding `endpoint`.
fn authorize_attributes(settings: &SolutionSettings, endpoint: Endpoint) -> String {
    settings
        .policies
        .iter()
        .filter(|p| p.guards(endpoint))
        .map(|p| format!("{INDENT}[Authorize(Policy = \"{}\")]\n", p.name))
        .collect()
}

fn controller(location: &ClassPath, settings: &SolutionSettings, entity: &Entity) -> String {
    let name = &entity.name;
    let plural = entity.plural();
    let route = plural.to_lowercase();
    let var = lowercase_first(name);
    let ctx = &settings.db_context_name;
    let (pk_type, pk_name) = entity
        .primary_key()
        .map(|pk| (pk.type_name.clone(), pk.name.clone()))
        .unwrap_or_else(|| ("int".to_string(), "Id".to_string()));
    let i = INDENT;
    let auth = |endpoint| authorize_attributes(settings, endpoint);

    format!(
        "namespace {ns};\n\
         \n\
         using System.Linq;\n\
         using System.Threading.Tasks;\n\
         using AutoMapper;\n\
         using Microsoft.AspNetCore.Authorization;\n\
         using Microsoft.AspNetCore.JsonPatch;\n\
         using Microsoft.AspNetCore.Mvc;\n\
         using Microsoft.EntityFrameworkCore;\n\
         using Sieve.Models;\n\
         using Sieve.Services;\n\
         using {entity_ns};\n\
         using {dto_ns};\n\
         using {ctx_ns};\n\
         \n\
         [ApiController]\n\
         [Route(\"api/{route}\")]\n\
         [ApiVersion(\"1.0\")]\n\
         public class {class} : ControllerBase\n\
         {{\n\
         {i}private readonly {ctx} _context;\n\
         {i}private readonly IMapper _mapper;\n\
         {i}private readonly ISieveProcessor _sieveProcessor;\n\
         \n\
         {i}public {class}({ctx} context, IMapper mapper, ISieveProcessor sieveProcessor)\n\
         {i}{{\n\
         {i}{i}_context = context;\n\
         {i}{i}_mapper = mapper;\n\
         {i}{i}_sieveProcessor = sieveProcessor;\n\
         {i}}}\n\
         \n\
         {get_list}\
         {i}[HttpGet(Name = \"Get{plural}\")]\n\
         {i}public async Task<IActionResult> Get{plural}([FromQuery] {name}ParametersDto parameters)\n\
         {i}{{\n\
         {i}{i}var sieveModel = new SieveModel\n\
         {i}{i}{{\n\
         {i}{i}{i}Filters = parameters.Filters,\n\
         {i}{i}{i}Sorts = parameters.SortOrder,\n\
         {i}{i}{i}Page = parameters.PageNumber,\n\
         {i}{i}{i}PageSize = parameters.PageSize,\n\
         {i}{i}}};\n\
         {i}{i}var query = _sieveProcessor.Apply(sieveModel, _context.{plural}.AsNoTracking());\n\
         {i}{i}var records = await query.ToListAsync();\n\
         {i}{i}return Ok(_mapper.Map<IEnumerable<{name}Dto>>(records));\n\
         {i}}}\n\
         \n\
         {get_record}\
         {i}[HttpGet(\"{{{var}Id}}\", Name = \"Get{name}\")]\n\
         {i}public async Task<ActionResult<{name}Dto>> Get{name}({pk_type} {var}Id)\n\
         {i}{{\n\
         {i}{i}var record = await _context.{plural}.FirstOrDefaultAsync(e => e.{pk_name} == {var}Id);\n\
         {i}{i}if (record == null)\n\
         {i}{i}{i}return NotFound();\n\
         \n\
         {i}{i}return Ok(_mapper.Map<{name}Dto>(record));\n\
         {i}}}\n\
         \n\
         {add_record}\
         {i}[HttpPost]\n\
         {i}public async Task<ActionResult<{name}Dto>> Add{name}([FromBody] {name}ForCreationDto {var}ForCreation)\n\
         {i}{{\n\
         {i}{i}var record = _mapper.Map<{name}>({var}ForCreation);\n\
         {i}{i}_context.{plural}.Add(record);\n\
         {i}{i}await _context.SaveChangesAsync();\n\
         \n\
         {i}{i}var dto = _mapper.Map<{name}Dto>(record);\n\
         {i}{i}return CreatedAtRoute(\"Get{name}\", new {{ {var}Id = record.{pk_name} }}, dto);\n\
         {i}}}\n\
         \n\
         {update_record}\
         {i}[HttpPut(\"{{{var}Id}}\")]\n\
         {i}public async Task<IActionResult> Update{name}({pk_type} {var}Id, {name}ForUpdateDto {var})\n\
         {i}{{\n\
         {i}{i}var record = await _context.{plural}.FirstOrDefaultAsync(e => e.{pk_name} == {var}Id);\n\
         {i}{i}if (record == null)\n\
         {i}{i}{i}return NotFound();\n\
         \n\
         {i}{i}_mapper.Map({var}, record);\n\
         {i}{i}await _context.SaveChangesAsync();\n\
         {i}{i}return NoContent();\n\
         {i}}}\n\
         \n\
         {update_partial}\
         {i}[HttpPatch(\"{{{var}Id}}\")]\n\
         {i}public async Task<IActionResult> PartiallyUpdate{name}({pk_type} {var}Id, JsonPatchDocument<{name}ForUpdateDto> patchDoc)\n\
         {i}{{\n\
         {i}{i}var record = await _context.{plural}.FirstOrDefaultAsync(e => e.{pk_name} == {var}Id);\n\
         {i}{i}if (record == null)\n\
         {i}{i}{i}return NotFound();\n\
         \n\
         {i}{i}var patched = _mapper.Map<{name}ForUpdateDto>(record);\n\
         {i}{i}patchDoc.ApplyTo(patched, ModelState);\n\
         {i}{i}if (!TryValidateModel(patched))\n\
         {i}{i}{i}return ValidationProblem(ModelState);\n\
         \n\
         {i}{i}_mapper.Map(patched, record);\n\
         {i}{i}await _context.SaveChangesAsync();\n\
         {i}{i}return NoContent();\n\
         {i}}}\n\
         \n\
         {delete_record}\
         {i}[HttpDelete(\"{{{var}Id}}\")]\n\
         {i}public async Task<ActionResult> Delete{name}({pk_type} {var}Id)\n\
         {i}{{\n\
         {i}{i}var record = await _context.{plural}.FirstOrDefaultAsync(e => e.{pk_name} == {var}Id);\n\
         {i}{i}if (record == null)\n\
         {i}{i}{i}return NotFound();\n\
         \n\
         {i}{i}_context.{plural}.Remove(record);\n\
         {i}{i}await _context.SaveChangesAsync();\n\
         {i}{i}return NoContent();\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        entity_ns = namespace_of(ArtifactKind::Entity, name, settings),
        dto_ns = namespace_of(ArtifactKind::DtoRead, name, settings),
        ctx_ns = namespace_of(ArtifactKind::DbContext, ctx, settings),
        get_list = auth(Endpoint::GetList),
        get_record = auth(Endpoint::GetRecord),
        add_record = auth(Endpoint::AddRecord),
        update_record = auth(Endpoint::UpdateRecord),
        update_partial = auth(Endpoint::UpdatePartial),
        delete_record = auth(Endpoint::DeleteRecord),
    )
}

fn swagger_registration(location: &ClassPath, settings: &SolutionSettings) -> String {
    let title = settings
        .swagger
        .title
        .clone()
        .unwrap_or_else(|| settings.solution_name.clone());
    let comments = if settings.swagger.add_swagger_comments {
        format!(
            "\n{i}{i}{i}var xmlFile = $\"{{Assembly.GetExecutingAssembly().GetName().Name}}.xml\";\n\
             {i}{i}{i}options.IncludeXmlComments(Path.Combine(AppContext.BaseDirectory, xmlFile));\n",
            i = INDENT
        )
    } else {
        String::new()
    };
    format!(
        "namespace {ns};\n\
         \n\
         using System;\n\
         using System.IO;\n\
         using System.Reflection;\n\
         using Microsoft.Extensions.DependencyInjection;\n\
         using Microsoft.OpenApi.Models;\n\
         \n\
         public static class {class}\n\
         {{\n\
         {i}public static void AddSwaggerExtension(this IServiceCollection services)\n\
         {i}{{\n\
         {i}{i}services.AddSwaggerGen(options =>\n\
         {i}{i}{{\n\
         {i}{i}{i}options.SwaggerDoc(\"v1\", new OpenApiInfo {{ Title = \"{title}\", Version = \"v1\" }});\n\
         {comments}\
         {i}{i}}});\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        i = INDENT,
    )
}

fn bus_registration(location: &ClassPath) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using MassTransit;\n\
         using Microsoft.Extensions.Configuration;\n\
         using Microsoft.Extensions.DependencyInjection;\n\
         \n\
         public static class {class}\n\
         {{\n\
         {i}public static void AddMassTransitServices(this IServiceCollection services, IConfiguration configuration)\n\
         {i}{{\n\
         {i}{i}services.AddMassTransit(mt =>\n\
         {i}{i}{{\n\
         {i}{i}{i}mt.UsingRabbitMq((context, cfg) =>\n\
         {i}{i}{i}{{\n\
         {i}{i}{i}{i}cfg.Host(configuration[\"RMQ:Host\"]);\n\
         {i}{i}{i}{i}cfg.ConfigureEndpoints(context);\n\
         {i}{i}{i}}});\n\
         {i}{i}}});\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        i = INDENT,
    )
}

fn producer(location: &ClassPath, exchange: &str) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using System.Threading.Tasks;\n\
         using MassTransit;\n\
         \n\
         public class {class}\n\
         {{\n\
         {i}public const string ExchangeName = \"{exchange}\";\n\
         \n\
         {i}private readonly IPublishEndpoint _publishEndpoint;\n\
         \n\
         {i}public {class}(IPublishEndpoint publishEndpoint)\n\
         {i}{{\n\
         {i}{i}_publishEndpoint = publishEndpoint;\n\
         {i}}}\n\
         \n\
         {i}public Task Publish<T>(T message) where T : class\n\
         {i}{i}=> _publishEndpoint.Publish(message);\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        i = INDENT,
    )
}

fn consumer(location: &ClassPath, queue: &str) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using System.Threading.Tasks;\n\
         using MassTransit;\n\
         \n\
         public class {class} : IConsumer<object>\n\
         {{\n\
         {i}public const string QueueName = \"{queue}\";\n\
         \n\
         {i}public Task Consume(ConsumeContext<object> context)\n\
         {i}{{\n\
         {i}{i}return Task.CompletedTask;\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        i = INDENT,
    )
}

fn app_settings(settings: &SolutionSettings, connection_string: Option<&str>) -> JoineryResult<String> {
    let document = json!({
        "Urls": format!("https://localhost:{}", settings.port),
        "ConnectionStrings": {
            settings.database_name.as_str(): connection_string.unwrap_or_default(),
        },
        "Logging": {
            "LogLevel": {
                "Default": "Information",
                "Microsoft.AspNetCore": "Warning",
            }
        },
        "AllowedHosts": "*",
    });
    let mut text = serde_json::to_string_pretty(&document).map_err(|e| {
        ApplicationError::RenderingFailed {
            what: ArtifactKind::AppSettings.to_string(),
            reason: e.to_string(),
        }
    })?;
    text.push('\n');
    Ok(text)
}

// ── Infrastructure project ───────────────────────────────────────────────────

fn service_registration(location: &ClassPath, settings: &SolutionSettings) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using Microsoft.EntityFrameworkCore;\n\
         using Microsoft.Extensions.Configuration;\n\
         using Microsoft.Extensions.DependencyInjection;\n\
         using {ctx_ns};\n\
         \n\
         public static class {class}\n\
         {{\n\
         {i}public static void AddInfrastructure(this IServiceCollection services, IConfiguration configuration)\n\
         {i}{{\n\
         {db_context}\n\
         \n\
         {auth}\n\
         \n\
         {i}{i}services.AddAuthorization(options =>\n\
         {i}{i}{{\n\
         {policies}\n\
         {i}{i}}});\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        ctx_ns = namespace_of(ArtifactKind::DbContext, &settings.db_context_name, settings),
        db_context = marker(Anchor::DbContext, 2),
        auth = marker(Anchor::Auth, 2),
        policies = marker(Anchor::Policies, 3),
        i = INDENT,
    )
}

fn db_context(location: &ClassPath, settings: &SolutionSettings) -> String {
    let class = location.class_name();
    format!(
        "namespace {ns};\n\
         \n\
         using Microsoft.EntityFrameworkCore;\n\
         using {entity_ns};\n\
         \n\
         public class {class} : DbContext\n\
         {{\n\
         {i}public {class}(DbContextOptions<{class}> options)\n\
         {i}{i}: base(options)\n\
         {i}{{\n\
         {i}}}\n\
         \n\
         {anchor}\n\
         }}\n",
        ns = location.namespace(),
        entity_ns = namespace_of(ArtifactKind::Entity, "", settings),
        anchor = marker(Anchor::DbSets, 1),
        i = INDENT,
    )
}

fn db_seeder(location: &ClassPath, settings: &SolutionSettings) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using System.Linq;\n\
         using AutoBogus;\n\
         using {entity_ns};\n\
         using {ctx_ns};\n\
         \n\
         public static class {class}\n\
         {{\n\
         {i}public static void SeedSampleData({ctx} context)\n\
         {i}{{\n\
         {anchor}\n\
         \n\
         {i}{i}context.SaveChanges();\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        ctx = settings.db_context_name,
        entity_ns = namespace_of(ArtifactKind::Entity, "", settings),
        ctx_ns = namespace_of(ArtifactKind::DbContext, &settings.db_context_name, settings),
        anchor = marker(Anchor::Seeders, 2),
        i = INDENT,
    )
}

// ── Tests project ────────────────────────────────────────────────────────────

fn fake(location: &ClassPath, settings: &SolutionSettings, entity: &Entity) -> String {
    format!(
        "namespace {ns};\n\
         \n\
         using AutoBogus;\n\
         using {entity_ns};\n\
         \n\
         public class {class} : AutoFaker<{name}>\n\
         {{\n\
         {i}public {class}()\n\
         {i}{{\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        name = entity.name,
        entity_ns = namespace_of(ArtifactKind::Entity, &entity.name, settings),
        i = INDENT,
    )
}

fn test_fixture(location: &ClassPath, settings: &SolutionSettings) -> String {
    let ctx = &settings.db_context_name;
    format!(
        "namespace {ns};\n\
         \n\
         using System;\n\
         using Microsoft.EntityFrameworkCore;\n\
         using {ctx_ns};\n\
         \n\
         public class {class} : IDisposable\n\
         {{\n\
         {i}public {ctx} Context {{ get; }}\n\
         \n\
         {i}public {class}()\n\
         {i}{{\n\
         {i}{i}var options = new DbContextOptionsBuilder<{ctx}>()\n\
         {i}{i}{i}.UseInMemoryDatabase($\"{db}-{{Guid.NewGuid()}}\")\n\
         {i}{i}{i}.Options;\n\
         {i}{i}Context = new {ctx}(options);\n\
         {i}}}\n\
         \n\
         {i}public void Dispose() => Context.Dispose();\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        db = settings.database_name,
        ctx_ns = namespace_of(ArtifactKind::DbContext, ctx, settings),
        i = INDENT,
    )
}

fn test_base(location: &ClassPath, settings: &SolutionSettings) -> String {
    let fixture = ClassPath::resolve(ArtifactKind::TestFixture, "", &settings.solution_name);
    format!(
        "namespace {ns};\n\
         \n\
         using Xunit;\n\
         \n\
         public class {class} : IClassFixture<{fixture}>\n\
         {{\n\
         {i}protected {fixture} Fixture {{ get; }}\n\
         \n\
         {i}public {class}({fixture} fixture)\n\
         {i}{{\n\
         {i}{i}Fixture = fixture;\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        fixture = fixture.class_name(),
        i = INDENT,
    )
}

fn api_routes(location: &ClassPath, entities: &[Entity]) -> String {
    let i = INDENT;
    let mut routes = String::new();
    for entity in entities {
        let plural = entity.plural();
        let _ = write!(
            routes,
            "\n{i}public static class {plural}\n\
             {i}{{\n\
             {i}{i}public const string Base = $\"{{Root}}/{route}\";\n\
             {i}{i}public static string GetRecord(object id) => $\"{{Base}}/{{id}}\";\n\
             {i}}}\n",
            route = plural.to_lowercase(),
        );
    }
    format!(
        "namespace {ns};\n\
         \n\
         public static class {class}\n\
         {{\n\
         {i}public const string Root = \"api\";\n\
         {i}public const string Health = $\"{{Root}}/health\";\n\
         {routes}}}\n",
        ns = location.namespace(),
        class = location.class_name(),
    )
}

fn health_check_test(location: &ClassPath, settings: &SolutionSettings) -> String {
    let utilities = ClassPath::resolve(ArtifactKind::ApiRoutes, "", &settings.solution_name);
    format!(
        "namespace {ns};\n\
         \n\
         using System.Net;\n\
         using System.Threading.Tasks;\n\
         using Microsoft.AspNetCore.Mvc.Testing;\n\
         using {utilities_ns};\n\
         using Xunit;\n\
         \n\
         public class {class} : IClassFixture<WebApplicationFactory<Program>>\n\
         {{\n\
         {i}private readonly WebApplicationFactory<Program> _factory;\n\
         \n\
         {i}public {class}(WebApplicationFactory<Program> factory)\n\
         {i}{{\n\
         {i}{i}_factory = factory;\n\
         {i}}}\n\
         \n\
         {i}[Fact]\n\
         {i}public async Task health_check_returns_ok()\n\
         {i}{{\n\
         {i}{i}var client = _factory.CreateClient();\n\
         {i}{i}var response = await client.GetAsync(ApiRoutes.Health);\n\
         {i}{i}Assert.Equal(HttpStatusCode.OK, response.StatusCode);\n\
         {i}}}\n\
         }}\n",
        ns = location.namespace(),
        class = location.class_name(),
        utilities_ns = utilities.namespace(),
        i = INDENT,
    )
}
